//! Layer classification and the fixed import-direction whitelist.

use serde::Serialize;

use crate::diagnostics::{CheckId, CheckResult, Diagnostic};
use crate::graph::SourceGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Data,
    Core,
    Adapters,
    Ui,
    App,
    Other,
}

const LAYER_PREFIXES: &[(&str, Layer)] = &[
    ("data/", Layer::Data),
    ("src/core/", Layer::Core),
    ("src/adapters/", Layer::Adapters),
    ("src/ui/", Layer::Ui),
    ("src/app/", Layer::App),
];

impl Layer {
    pub fn classify(path: &str) -> Layer {
        LAYER_PREFIXES
            .iter()
            .find(|(prefix, _)| path.starts_with(prefix))
            .map(|(_, layer)| *layer)
            .unwrap_or(Layer::Other)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Data => "data",
            Layer::Core => "core",
            Layer::Adapters => "adapters",
            Layer::Ui => "ui",
            Layer::App => "app",
            Layer::Other => "other",
        }
    }

    /// Layers this layer may import from. `Other` has no rule and may import
    /// nothing.
    pub fn allowed_targets(self) -> &'static [Layer] {
        match self {
            Layer::Data => &[Layer::Data],
            Layer::Core => &[Layer::Core],
            Layer::Adapters => &[Layer::Adapters, Layer::Core, Layer::Data],
            Layer::Ui => &[Layer::Ui, Layer::Adapters, Layer::Core, Layer::Data],
            Layer::App => &[
                Layer::App,
                Layer::Ui,
                Layer::Adapters,
                Layer::Core,
                Layer::Data,
            ],
            Layer::Other => &[],
        }
    }

    pub fn permits(self, target: Layer) -> bool {
        self.allowed_targets().contains(&target)
    }
}

/// Every source file must sit in a known layer and import only from layers
/// its own layer permits. Returns the number of edges checked.
pub fn check_layers(graph: &SourceGraph) -> CheckResult<usize> {
    let mut checked = 0usize;
    for (source, edges) in graph.iter() {
        let source_layer = Layer::classify(source);
        if source_layer == Layer::Other {
            return Err(Diagnostic::invariant(
                CheckId::Layers,
                "E_LAYER_UNKNOWN",
                format!("source file outside known layers: {source}"),
            )
            .with_file(source)
            .into());
        }
        for edge in edges {
            checked += 1;
            if source_layer.permits(edge.target_layer) {
                continue;
            }
            return Err(Diagnostic::invariant(
                CheckId::Layers,
                "E_LAYER_VIOLATION",
                format!(
                    "layer violation: {source} ({}) imports {} ({})",
                    source_layer.as_str(),
                    edge.target,
                    edge.target_layer.as_str()
                ),
            )
            .with_file(source)
            .with_data("source_layer", source_layer.as_str())
            .with_data("specifier", edge.specifier.as_str())
            .with_data("target", edge.target.as_str())
            .with_data("target_layer", edge.target_layer.as_str())
            .into());
        }
    }
    tracing::debug!(edges = checked, "layer edges checked");
    Ok(checked)
}
