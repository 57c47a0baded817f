// Infrastructure layer: SCC detection, file formats, serde, eventing
pub mod event_ndjson;
pub mod scc_kosaraju;
pub mod schema_validator;
pub mod serde_json_adapter;
pub mod text_format;
