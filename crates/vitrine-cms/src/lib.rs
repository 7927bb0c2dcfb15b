//! Client side of the headless CMS: the GraphQL gateway, the content data
//! model, and the composition resolver that turns layout trees into flat
//! block lists.
//!
//! Nothing in this crate renders HTML or touches the HTTP server; it only
//! talks to the upstream GraphQL endpoint and reshapes its JSON.

pub mod composition;
pub mod config;
pub mod content;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod queries;
pub mod transport;

pub use composition::{
	Composition, Element, NodeSet, resolve_composition, resolve_content_area, resolve_page_blocks,
};
pub use config::{AuthMode, CmsConfig};
pub use content::{ContentItem, ItemMetadata, ItemUrl, ResolvedBlock};
pub use envelope::{ApiEnvelope, PageEnvelope};
pub use error::{CmsError, CmsResult};
pub use gateway::{CmsGateway, PreviewRequest};
pub use transport::{GraphqlTransport, HttpTransport};
