//! Top level entry point: description text in, BPMN XML out.

use crate::{
    api::{AnalysisStage, GeneratedBpmn},
    error::Result,
    model::ProcessModel,
    writer,
};
use log::info;

/// Translate a process description into a BPMN 2.0 document.
///
/// Pure and self-contained: every call is an independent computation over its
/// own input, so it is safe to call repeatedly and from several threads.
pub fn generate(description: &str) -> Result<GeneratedBpmn> {
    generate_with_progress(description, |_| {})
}

/// Same as [`generate`], reporting each analysis stage to the callback. The
/// stage sequence is the fixed progression the UI shows; the analysis itself
/// is a single pass over the text.
pub fn generate_with_progress(
    description: &str,
    mut progress: impl FnMut(AnalysisStage),
) -> Result<GeneratedBpmn> {
    progress(AnalysisStage::Structure);
    let model = ProcessModel::from_text(description);

    progress(AnalysisStage::Participants);
    progress(AnalysisStage::Tasks);
    info!(
        "analyzed description: {} tasks, {} decisions, {} participants",
        model.tasks.len(),
        model.decisions.len(),
        model.participants.len()
    );

    progress(AnalysisStage::Pools);
    progress(AnalysisStage::Gateways);

    progress(AnalysisStage::Serialization);
    let xml = writer::write_definitions(&model)?;

    Ok(GeneratedBpmn { xml, model })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer;

    #[test]
    fn generate_returns_xml_and_model() {
        let output = generate("1. Клиент оформляет заказ\n2. Менеджер проверяет заказ").unwrap();
        assert_eq!(output.model.tasks.len(), 2);
        assert!(output.xml.starts_with("<?xml"));
        assert!(output.xml.contains("bpmn:definitions"));
    }

    #[test]
    fn progress_reports_every_stage_in_order() {
        let mut stages = Vec::new();
        generate_with_progress("1. Клиент оформляет заказ", |stage| stages.push(stage)).unwrap();
        assert_eq!(stages, AnalysisStage::ALL);
    }

    #[test]
    fn generated_document_has_no_dangling_references() {
        let text = "1. Клиент выбирает товары на сайте\n\
                    2. Система проверяет наличие товаров на складе\n\
                    Если товаров нет, заказ отменяется\n\
                    3. Товары упаковываются и отправляются клиенту";
        let output = generate(text).unwrap();
        let summary = viewer::inspect(&output.xml).unwrap();

        assert_eq!(summary.start_events, 1);
        assert_eq!(summary.end_events, 1);
        assert_eq!(summary.sequence_flows, output.model.element_count() + 1);
        assert!(summary.dangling_refs.is_empty(), "{:?}", summary.dangling_refs);
    }

    #[test]
    fn empty_description_yields_start_to_end_document() {
        let output = generate("\n   \n").unwrap();
        let summary = viewer::inspect(&output.xml).unwrap();
        assert_eq!(summary.flow_nodes, 2);
        assert_eq!(summary.sequence_flows, 1);
        assert!(summary.dangling_refs.is_empty());
    }
}
