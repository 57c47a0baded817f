use crate::domain::graph::{build_graph, Graph};
use crate::infrastructure::schema_validator::validate_graph_file;
use crate::usecase::analyze::GraphAnalysis;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GraphFileDto {
    pub vertex_count: i64,

    #[serde(default)]
    pub edges: Vec<(i64, i64)>,
}

impl GraphFileDto {
    pub fn to_graph(&self) -> Result<Graph> {
        Ok(build_graph(self.vertex_count, &self.edges)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AnalysisReportDto {
    pub component_count: usize,
    pub membership: Vec<usize>,
    pub components: Vec<Vec<usize>>,
    pub cyclic_components: Vec<bool>,
    pub condensation: Vec<Vec<usize>>,
}

impl From<&GraphAnalysis> for AnalysisReportDto {
    fn from(a: &GraphAnalysis) -> Self {
        Self {
            component_count: a.scc.component_count(),
            membership: a.scc.component_of.clone(),
            components: a.scc.components.clone(),
            cyclic_components: a.scc.cyclic_component.clone(),
            condensation: (0..a.condensation.node_count())
                .map(|c| a.condensation.successors(c).to_vec())
                .collect(),
        }
    }
}

pub fn parse_graph_json(raw: &str) -> Result<GraphFileDto> {
    let value: Value = serde_json::from_str(raw).context("graph file is not valid JSON")?;
    validate_graph_file(&value)?;
    let dto: GraphFileDto = serde_json::from_value(value)?;
    Ok(dto)
}

pub async fn read_graph_file(path: &str) -> Result<GraphFileDto> {
    let raw = fs::read_to_string(path).await?;
    parse_graph_json(&raw)
}

pub async fn write_report_file(path: &str, report: &AnalysisReportDto) -> Result<()> {
    let pretty = serde_json::to_string_pretty(report)?;
    fs::write(path, pretty).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::graph::GraphError;
    use crate::infrastructure::scc_kosaraju::KosarajuSccDetector;
    use crate::usecase::analyze::analyze_graph;
    use tempfile::tempdir;

    #[test]
    fn parse_graph_json_builds_graph() {
        let dto = parse_graph_json(r#"{"vertex_count": 3, "edges": [[0, 1], [1, 2], [2, 0]]}"#)
            .expect("parse");
        assert_eq!(dto.vertex_count, 3);

        let g = dto.to_graph().expect("graph");
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.neighbors(2), &[0]);
    }

    #[test]
    fn edges_default_to_empty() {
        let dto = parse_graph_json(r#"{"vertex_count": 2}"#).expect("parse");
        assert!(dto.edges.is_empty());
    }

    #[test]
    fn to_graph_reports_invalid_construction() {
        let dto = parse_graph_json(r#"{"vertex_count": 2, "edges": [[0, 7]]}"#).expect("parse");
        let err = dto.to_graph().unwrap_err().to_string();
        assert!(err.contains("outside [0, 2)"));
    }

    #[test]
    fn to_graph_reports_unallocatable_vertex_count() {
        let dto = parse_graph_json(r#"{"vertex_count": 9223372036854775807}"#).expect("parse");
        let err = dto.to_graph().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GraphError>(),
            Some(GraphError::TooManyVertices(_))
        ));
    }

    #[tokio::test]
    async fn report_file_round_trips() {
        let dir = tempdir().expect("tempdir");
        let graph_path = dir.path().join("graph.json");
        let report_path = dir.path().join("report.json");

        std::fs::write(
            &graph_path,
            r#"{"vertex_count": 2, "edges": [[0, 1]]}"#,
        )
        .expect("write graph");

        let dto = read_graph_file(graph_path.to_str().unwrap())
            .await
            .expect("read");
        let g = dto.to_graph().expect("graph");
        let (analysis, _) = analyze_graph(&g, &KosarajuSccDetector, None)
            .await
            .expect("analyze");
        let report = AnalysisReportDto::from(&analysis);

        write_report_file(report_path.to_str().unwrap(), &report)
            .await
            .expect("write");

        let raw = std::fs::read_to_string(&report_path).expect("read report");
        let reread: AnalysisReportDto = serde_json::from_str(&raw).expect("parse report");
        assert_eq!(reread, report);
        assert_eq!(reread.component_count, 2);
        assert_eq!(reread.condensation.iter().map(Vec::len).sum::<usize>(), 1);
    }
}
