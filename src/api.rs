use crate::model::ProcessModel;
use std::fmt::Display;

/// Result of one generation run: the BPMN XML string and the model it was
/// serialized from. Held by the caller; the crate keeps no state between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBpmn {
    pub xml: String,
    pub model: ProcessModel,
}

/// Rendering adapter seam. The only contract toward the diagramming side is
/// "accepts an XML string, reports success or a failure reason".
pub trait Renderer {
    fn import_xml(&mut self, xml: &str) -> Result<(), String>;
}

/// The analysis stages reported during generation. The surrounding UI used to
/// show these with artificial pauses; here they are plain progress events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    Structure,
    Participants,
    Tasks,
    Pools,
    Gateways,
    Serialization,
}

impl AnalysisStage {
    pub const ALL: [AnalysisStage; 6] = [
        AnalysisStage::Structure,
        AnalysisStage::Participants,
        AnalysisStage::Tasks,
        AnalysisStage::Pools,
        AnalysisStage::Gateways,
        AnalysisStage::Serialization,
    ];

    /// Status message shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            AnalysisStage::Structure => "Анализирую структуру процесса...",
            AnalysisStage::Participants => "Определяю участников и роли...",
            AnalysisStage::Tasks => "Выявляю задачи и последовательность...",
            AnalysisStage::Pools => "Создаю пулы и дорожки...",
            AnalysisStage::Gateways => "Добавляю шлюзы и потоки...",
            AnalysisStage::Serialization => "Формирую профессиональную BPMN 2.0 XML...",
        }
    }
}

impl Display for AnalysisStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
