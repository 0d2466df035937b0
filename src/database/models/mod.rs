// Raw-row types over the Spanish-vocabulary schema. These decode straight
// from SQL results; view shaping happens in the handlers via `crate::api`.

pub mod advisor;
pub mod article;
pub mod favorites;
pub mod faq;
pub mod lead;
pub mod property;
pub mod proposal;
pub mod tenant;
pub mod testimonial;
