use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::dot::parse_dot;
use crate::network::ContactNetwork;

const MODEL_G_DOT: &str = include_str!("../data/model_g.dot");
const MODEL_Q_DOT: &str = include_str!("../data/model_q.dot");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum GraphModel {
    /// Everyday interaction network.
    ModelG,
    /// Interaction network while quarantined.
    ModelQ,
}

impl GraphModel {
    pub const ALL: [Self; 2] = [Self::ModelG, Self::ModelQ];

    pub fn key(self) -> &'static str {
        match self {
            Self::ModelG => "modelG",
            Self::ModelQ => "modelQ",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ModelG => "Interaction (modelG)",
            Self::ModelQ => "Quarantine interaction (modelQ)",
        }
    }
}

#[derive(Clone, Debug)]
pub enum DatasetSource {
    Bundled(&'static str),
    File(PathBuf),
}

impl DatasetSource {
    pub fn describe(&self) -> String {
        match self {
            Self::Bundled(_) => "bundled dataset".to_owned(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatasetSources {
    model_g: DatasetSource,
    model_q: DatasetSource,
}

impl Default for DatasetSources {
    fn default() -> Self {
        Self {
            model_g: DatasetSource::Bundled(MODEL_G_DOT),
            model_q: DatasetSource::Bundled(MODEL_Q_DOT),
        }
    }
}

impl DatasetSources {
    pub fn with_override(mut self, model: GraphModel, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            *self.source_mut(model) = DatasetSource::File(path);
        }
        self
    }

    pub fn source(&self, model: GraphModel) -> &DatasetSource {
        match model {
            GraphModel::ModelG => &self.model_g,
            GraphModel::ModelQ => &self.model_q,
        }
    }

    fn source_mut(&mut self, model: GraphModel) -> &mut DatasetSource {
        match model {
            GraphModel::ModelG => &mut self.model_g,
            GraphModel::ModelQ => &mut self.model_q,
        }
    }

    pub fn load(&self, model: GraphModel) -> Result<ContactNetwork> {
        let source = self.source(model);
        let text: Cow<'_, str> = match source {
            DatasetSource::Bundled(text) => Cow::Borrowed(*text),
            DatasetSource::File(path) => Cow::Owned(fs::read_to_string(path).with_context(|| {
                format!("failed to read {} from {}", model.key(), path.display())
            })?),
        };

        let graph = parse_dot(&text)
            .with_context(|| format!("failed to parse {} ({})", model.key(), source.describe()))?;
        log::debug!(
            "parsed {}{} graph {:?}: {} nodes, {} edges",
            if graph.strict { "strict " } else { "" },
            if graph.directed { "directed" } else { "undirected" },
            graph.name.as_deref().unwrap_or("<anonymous>"),
            graph.node_count(),
            graph.edge_count()
        );
        Ok(ContactNetwork::from_dot(&graph))
    }
}
