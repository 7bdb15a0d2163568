// Résumé generation: validation gate, presentation builder, section renderers.
// The builder only talks to `render::model`; container details live in `render`.

pub mod builder;
pub mod gate;
pub mod handlers;
pub mod sections;
