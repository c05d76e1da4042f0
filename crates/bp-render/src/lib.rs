//! Drawing for the blueprint canvas: wireframe fragments, atoms, node
//! visuals, hit testing and SVG export. Everything here is host-agnostic;
//! a surface only has to paint a [`Scene`].

pub mod atom;
pub mod export;
pub mod handles;
pub mod hit;
pub mod primitive;
pub mod scene;
pub mod wireframe;

pub use atom::{AtomKind, AtomOutput, AtomRenderer};
pub use handles::{Handle, HandleKind, handles_for, resize};
pub use hit::{hit_handle, hit_node, hit_primitive, hit_title};
pub use primitive::{Fragment, Primitive, Shape};
pub use scene::{ContentKind, NodeVisual, Scene, SceneRenderer, TitleState};
pub use export::{SvgOptions, render_svg};
pub use wireframe::WireframeLibrary;
