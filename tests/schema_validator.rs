use serde_json::json;
use anyhow::Result;

use graph_condensation::infrastructure::schema_validator::validate_graph_file;

#[test]
fn validate_valid_graph_integration() -> Result<()> {
    let graph = json!({
        "vertex_count": 3,
        "edges": [[0, 1], [1, 2], [2, 0]]
    });

    validate_graph_file(&graph)?;
    Ok(())
}

#[test]
fn validate_graph_without_edges_integration() -> Result<()> {
    validate_graph_file(&json!({ "vertex_count": 0 }))?;
    Ok(())
}

#[test]
fn validate_rejects_missing_vertex_count() {
    let graph = json!({ "edges": [[0, 1]] });
    let err = validate_graph_file(&graph).unwrap_err().to_string();
    assert!(err.contains("Graph file validation failed"));
}

#[test]
fn validate_rejects_malformed_edges() {
    assert!(validate_graph_file(&json!({ "vertex_count": 2, "edges": [[0]] })).is_err());
    assert!(validate_graph_file(&json!({ "vertex_count": 2, "edges": [[0, 1, 1]] })).is_err());
    assert!(validate_graph_file(&json!({ "vertex_count": 2, "edges": [["0", 1]] })).is_err());
    assert!(validate_graph_file(&json!({ "vertex_count": 2.5 })).is_err());
}

#[test]
fn validate_rejects_unknown_fields() {
    let graph = json!({ "vertex_count": 1, "weights": [] });
    assert!(validate_graph_file(&graph).is_err());
}

#[test]
fn validate_leaves_ranges_to_graph_construction() -> Result<()> {
    // Shape is fine; the negative count is rejected when the graph is built.
    validate_graph_file(&json!({ "vertex_count": -1, "edges": [[0, 9]] }))?;
    Ok(())
}
