use serde::Serialize;
use shortpath_core::{Graph, ShortestPaths};

/// Undirected A–F road map used by the demo mode.
pub const DEMO_EDGES: [(&str, &str, f64); 9] = [
    ("A", "B", 4.0),
    ("A", "C", 2.0),
    ("B", "C", 1.0),
    ("B", "D", 5.0),
    ("C", "D", 8.0),
    ("C", "E", 10.0),
    ("D", "E", 2.0),
    ("D", "F", 6.0),
    ("E", "F", 3.0),
];

pub fn demo_graph() -> shortpath_core::Result<Graph<String>> {
    let mut graph = Graph::new();
    for (a, b, w) in DEMO_EDGES {
        graph.add_undirected_edge(a.to_string(), b.to_string(), w)?;
    }
    Ok(graph)
}

/// One line of the demo report.
#[derive(Debug, Serialize, PartialEq)]
pub struct NodeReport {
    pub node: String,
    /// None when unreachable.
    pub distance: Option<f64>,
    pub path: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DemoReport {
    pub start: String,
    pub nodes: Vec<NodeReport>,
}

/// Collect per-node results, sorted by node name.
pub fn build_report(result: &ShortestPaths<String, f64>) -> DemoReport {
    let mut names: Vec<&String> = result.distances.keys().collect();
    names.sort();

    let nodes = names
        .into_iter()
        .map(|name| {
            let distance = result.distance(name).filter(|d| !d.is_infinite());
            let path = match distance {
                Some(_) => result.path_to(name),
                None => Vec::new(),
            };
            NodeReport {
                node: name.clone(),
                distance,
                path,
            }
        })
        .collect();

    DemoReport {
        start: result.start.clone(),
        nodes,
    }
}

pub fn render_text(report: &DemoReport) -> String {
    let mut out = format!("Start: {}\n\n", report.start);
    for entry in &report.nodes {
        match entry.distance {
            Some(d) => out.push_str(&format!(
                "{}: shortest_distance={:.0}, path={}\n",
                entry.node,
                d,
                entry.path.join(" -> ")
            )),
            None => out.push_str(&format!("{}: unreachable\n", entry.node)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shortpath_core::dijkstra;

    #[test]
    fn test_demo_text_from_a() {
        let graph = demo_graph().unwrap();
        let result = dijkstra(&graph, &"A".to_string());
        let text = render_text(&build_report(&result));
        let expected = "Start: A\n\n\
            A: shortest_distance=0, path=A\n\
            B: shortest_distance=3, path=A -> C -> B\n\
            C: shortest_distance=2, path=A -> C\n\
            D: shortest_distance=8, path=A -> C -> B -> D\n\
            E: shortest_distance=10, path=A -> C -> B -> D -> E\n\
            F: shortest_distance=13, path=A -> C -> B -> D -> E -> F\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_demo_unknown_start() {
        let graph = demo_graph().unwrap();
        let result = dijkstra(&graph, &"Z".to_string());
        let report = build_report(&result);
        assert_eq!(report.nodes.len(), 7);
        let z = report.nodes.iter().find(|n| n.node == "Z").unwrap();
        assert_eq!(z.distance, Some(0.0));
        assert_eq!(z.path, vec!["Z".to_string()]);
        let text = render_text(&report);
        assert!(text.contains("A: unreachable\n"));
    }

    #[test]
    fn test_demo_json_shape() {
        let graph = demo_graph().unwrap();
        let result = dijkstra(&graph, &"F".to_string());
        let json = serde_json::to_value(build_report(&result)).unwrap();
        assert_eq!(json["start"], "F");
        assert_eq!(json["nodes"][0]["node"], "A");
        assert_eq!(json["nodes"][0]["distance"], 13.0);
        assert_eq!(json["nodes"][5]["path"], serde_json::json!(["F"]));
    }
}
