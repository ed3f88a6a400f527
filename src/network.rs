use crate::dot::DotGraph;

/// Contact network as the viewer sees it: people and who they interact with.
#[derive(Clone, Debug, Default)]
pub struct ContactNetwork {
    ids: Vec<String>,
    labels: Vec<Option<String>>,
    links: Vec<(usize, usize)>,
    neighbors: Vec<Vec<usize>>,
}

impl ContactNetwork {
    pub fn from_dot(graph: &DotGraph) -> Self {
        let ids = graph
            .nodes
            .iter()
            .map(|node| node.id.clone())
            .collect::<Vec<_>>();
        let labels = graph
            .nodes
            .iter()
            .map(|node| node.attributes.get("label").cloned())
            .collect();
        let links = graph
            .edges
            .iter()
            .map(|edge| (edge.from, edge.to))
            .collect::<Vec<_>>();

        let mut neighbors = vec![Vec::new(); ids.len()];
        for &(from, to) in &links {
            neighbors[from].push(to);
            if from != to {
                neighbors[to].push(from);
            }
        }

        Self {
            ids,
            labels,
            links,
            neighbors,
        }
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn links(&self) -> &[(usize, usize)] {
        &self.links
    }

    pub fn node_id(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    pub fn node_label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).and_then(Option::as_deref)
    }

    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.neighbors
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of adjacency entries; a self-loop counts once.
    pub fn degree(&self, index: usize) -> usize {
        self.neighbors(index).len()
    }
}
