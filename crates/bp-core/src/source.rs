//! JSON shape of a design document, as handed over by the loader.
//!
//! ```json
//! { "phases": [ { "id": "p1", "name": "Discovery", "color": "#6366F1",
//!     "category": "exploration",
//!     "sections": [ { "id": "s1", "name": "Auth",
//!       "features": [ { "id": "f1", "name": "Login",
//!         "components": [ { "id": "c1", "name": "Submit",
//!                           "interaction_type": "submit" } ] } ] } ] } ] }
//! ```

use crate::error::{Error, Result};
use crate::id::NodeId;
use crate::model::*;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

/// Fields every node carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeFields {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentSource {
    #[serde(default)]
    pub phases: Vec<PhaseSource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhaseSource {
    #[serde(flatten)]
    pub fields: NodeFields,
    #[serde(default)]
    pub category: PhaseCategory,
    #[serde(default)]
    pub sections: Vec<SectionSource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionSource {
    #[serde(flatten)]
    pub fields: NodeFields,
    #[serde(default)]
    pub features: Vec<FeatureSource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureSource {
    #[serde(flatten)]
    pub fields: NodeFields,
    #[serde(default)]
    pub components: Vec<ComponentSource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentSource {
    #[serde(flatten)]
    pub fields: NodeFields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,
    #[serde(default)]
    pub density: Density,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_role: Option<Role>,
}

impl Document {
    /// Parse a document from its JSON source.
    pub fn from_json(json: &str) -> Result<Self> {
        let source: DocumentSource = serde_json::from_str(json)?;
        Self::from_source(&source)
    }

    /// Build the tree, validating id uniqueness and colors.
    pub fn from_source(source: &DocumentSource) -> Result<Self> {
        let mut doc = Document::new();
        let root = doc.root;
        for phase in &source.phases {
            let p = insert(
                &mut doc,
                root,
                &phase.fields,
                NodeKind::Phase {
                    category: phase.category,
                },
            )?;
            for section in &phase.sections {
                let s = insert(&mut doc, p, &section.fields, NodeKind::Section)?;
                for feature in &section.features {
                    let f = insert(&mut doc, s, &feature.fields, NodeKind::Feature)?;
                    for component in &feature.components {
                        let attrs = LeafAttrs {
                            interaction_type: component.interaction_type.clone(),
                            importance: component.importance,
                            density: component.density,
                            semantic_role: component.semantic_role,
                        };
                        insert(&mut doc, f, &component.fields, NodeKind::Component(attrs))?;
                    }
                }
            }
        }
        log::debug!("loaded design document with {} nodes", doc.len());
        Ok(doc)
    }

    /// Re-emit the document in its source shape (reflects renames).
    pub fn to_source(&self) -> DocumentSource {
        let phases = self
            .children(self.root)
            .into_iter()
            .map(|p| {
                let NodeKind::Phase { category } = self.graph[p].kind else {
                    return PhaseSource::default();
                };
                PhaseSource {
                    fields: fields_of(&self.graph[p]),
                    category,
                    sections: self
                        .children(p)
                        .into_iter()
                        .map(|s| SectionSource {
                            fields: fields_of(&self.graph[s]),
                            features: self
                                .children(s)
                                .into_iter()
                                .map(|f| FeatureSource {
                                    fields: fields_of(&self.graph[f]),
                                    components: self
                                        .children(f)
                                        .into_iter()
                                        .map(|c| component_of(&self.graph[c]))
                                        .collect(),
                                })
                                .collect(),
                        })
                        .collect(),
                }
            })
            .collect();
        DocumentSource { phases }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_source())?)
    }
}

fn insert(
    doc: &mut Document,
    parent: NodeIndex,
    fields: &NodeFields,
    kind: NodeKind,
) -> Result<NodeIndex> {
    if fields.id.is_empty() || fields.id == ROOT_ID {
        return Err(Error::DuplicateId(fields.id.clone()));
    }
    let color = match &fields.color {
        Some(value) => Some(Color::from_hex(value).ok_or_else(|| Error::InvalidColor {
            id: fields.id.clone(),
            value: value.clone(),
        })?),
        None => None,
    };
    let mut node = DesignNode::new(NodeId::intern(&fields.id), kind, fields.name.clone());
    node.visual_hint = fields.visual_hint.clone();
    node.description = fields.description.clone();
    node.color = color;
    doc.add_node(parent, node)
        .ok_or_else(|| Error::DuplicateId(fields.id.clone()))
}

fn fields_of(node: &DesignNode) -> NodeFields {
    NodeFields {
        id: node.id.as_str().to_string(),
        name: node.name.clone(),
        visual_hint: node.visual_hint.clone(),
        description: node.description.clone(),
        color: node.color.map(|c| c.to_hex()),
    }
}

fn component_of(node: &DesignNode) -> ComponentSource {
    let attrs = node.leaf().cloned().unwrap_or_default();
    ComponentSource {
        fields: fields_of(node),
        interaction_type: attrs.interaction_type,
        importance: attrs.importance,
        density: attrs.density,
        semantic_role: attrs.semantic_role,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r##"{
      "phases": [{
        "id": "src_p1", "name": "Build", "color": "#F59E0B", "category": "architecture",
        "sections": [{
          "id": "src_s1", "name": "Checkout",
          "features": [{
            "id": "src_f1", "name": "Payment",
            "components": [
              {"id": "src_c1", "name": "Pay", "interaction_type": "submit", "density": "compact"},
              {"id": "src_c2", "name": "Card", "interaction_type": "input", "importance": "primary"}
            ]
          }]
        }]
      }]
    }"##;

    #[test]
    fn loads_nested_levels() {
        let doc = Document::from_json(SAMPLE).unwrap();
        assert_eq!(doc.len(), 5);
        assert_eq!(doc.phases(), vec![NodeId::intern("src_p1")]);
        let c1 = doc.get(NodeId::intern("src_c1")).unwrap();
        let attrs = c1.leaf().unwrap();
        assert_eq!(attrs.interaction_type.as_deref(), Some("submit"));
        assert_eq!(attrs.density, Density::Compact);
        assert_eq!(
            doc.phase_category(NodeId::intern("src_c2")),
            PhaseCategory::Architecture
        );
    }

    #[test]
    fn duplicate_id_is_an_error() {
        let json = r#"{"phases":[{"id":"dup_x","name":"A"},{"id":"dup_x","name":"B"}]}"#;
        let err = Document::from_json(json).unwrap_err();
        assert!(matches!(err, Error::DuplicateId(id) if id == "dup_x"));
    }

    #[test]
    fn bad_color_is_an_error() {
        let json = r#"{"phases":[{"id":"bad_c","name":"A","color":"teal-ish"}]}"#;
        assert!(matches!(
            Document::from_json(json).unwrap_err(),
            Error::InvalidColor { .. }
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Document::from_json("{\"phases\": [").unwrap_err(),
            Error::Json(_)
        ));
    }

    #[test]
    fn source_roundtrip_keeps_renames() {
        let mut doc = Document::from_json(SAMPLE).unwrap();
        doc.rename(NodeId::intern("src_c1"), "Pay now");
        let again = Document::from_source(&doc.to_source()).unwrap();
        assert_eq!(again.get(NodeId::intern("src_c1")).unwrap().name, "Pay now");
        assert_eq!(again.len(), doc.len());
    }
}
