//! Viewer mode: load an existing BPMN document, check that it is usable and
//! hand it to a rendering adapter.
//!
//! The crate never renders anything itself. `inspect` streams the document
//! once and reports what it found; `display` runs the same check and then
//! passes the raw XML string to the adapter.

use crate::{
    api::Renderer,
    error::{Error, MISSING_DEFINITIONS, Result},
};
use log::{debug, warn};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use std::collections::HashSet;

/// Element counts and reference problems found in a BPMN document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiagramSummary {
    pub processes: usize,
    pub participants: usize,
    pub start_events: usize,
    pub end_events: usize,
    /// Tasks, gateways and events inside processes, start and end included.
    pub flow_nodes: usize,
    pub sequence_flows: usize,
    pub message_flows: usize,
    pub shapes: usize,
    /// `sourceRef`/`targetRef` values that name no element in the document.
    pub dangling_refs: Vec<String>,
}

/// Stream a BPMN document and summarize it. Fails on malformed XML and on
/// documents without a `definitions` element.
pub fn inspect(xml: &str) -> Result<DiagramSummary> {
    let mut reader = Reader::from_str(xml);

    let mut summary = DiagramSummary::default();
    let mut seen_definitions = false;
    let mut ids: HashSet<String> = HashSet::new();
    let mut refs: Vec<String> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element) => {
                collect(&element, &mut summary, &mut seen_definitions, &mut ids, &mut refs)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_definitions {
        return Err(Error::NotBpmn(MISSING_DEFINITIONS.into()));
    }

    summary.dangling_refs = refs.into_iter().filter(|r| !ids.contains(r)).collect();
    debug!(
        "inspected diagram: {} flow nodes, {} sequence flows, {} dangling refs",
        summary.flow_nodes,
        summary.sequence_flows,
        summary.dangling_refs.len()
    );
    Ok(summary)
}

/// Check the document and hand it to the rendering adapter. Adapter failures
/// come back as [`Error::Import`]; nothing here panics.
pub fn display<R: Renderer>(xml: &str, renderer: &mut R) -> Result<DiagramSummary> {
    let summary = inspect(xml)?;
    if !summary.dangling_refs.is_empty() {
        warn!("diagram has dangling references: {}", summary.dangling_refs.join(", "));
    }
    renderer.import_xml(xml).map_err(Error::Import)?;
    Ok(summary)
}

fn collect(
    element: &BytesStart<'_>,
    summary: &mut DiagramSummary,
    seen_definitions: &mut bool,
    ids: &mut HashSet<String>,
    refs: &mut Vec<String>,
) -> Result<()> {
    match element.local_name().as_ref() {
        b"definitions" => *seen_definitions = true,
        b"process" => {
            summary.processes += 1;
            if let Some(id) = attribute(element, b"id")? {
                ids.insert(id);
            }
        }
        // Message flows in real files usually connect participants, not
        // tasks, so pools count as reference targets too.
        b"participant" => {
            summary.participants += 1;
            if let Some(id) = attribute(element, b"id")? {
                ids.insert(id);
            }
        }
        b"sequenceFlow" => {
            summary.sequence_flows += 1;
            collect_refs(element, refs)?;
        }
        b"messageFlow" => {
            summary.message_flows += 1;
            collect_refs(element, refs)?;
        }
        b"BPMNShape" => summary.shapes += 1,
        name if is_flow_node(name) => {
            summary.flow_nodes += 1;
            match name {
                b"startEvent" => summary.start_events += 1,
                b"endEvent" => summary.end_events += 1,
                _ => {}
            }
            if let Some(id) = attribute(element, b"id")? {
                ids.insert(id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn collect_refs(element: &BytesStart<'_>, refs: &mut Vec<String>) -> Result<()> {
    for key in [b"sourceRef".as_slice(), b"targetRef".as_slice()] {
        if let Some(value) = attribute(element, key)? {
            refs.push(value);
        }
    }
    Ok(())
}

fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name {
            // ids and refs are NCName-like, no entities to unescape
            return Ok(Some(String::from_utf8_lossy(&attr.value).into_owned()));
        }
    }
    Ok(None)
}

fn is_flow_node(name: &[u8]) -> bool {
    matches!(
        name,
        b"startEvent"
            | b"endEvent"
            | b"task"
            | b"userTask"
            | b"serviceTask"
            | b"sendTask"
            | b"receiveTask"
            | b"scriptTask"
            | b"manualTask"
            | b"businessRuleTask"
            | b"callActivity"
            | b"subProcess"
            | b"exclusiveGateway"
            | b"parallelGateway"
            | b"inclusiveGateway"
            | b"eventBasedGateway"
            | b"complexGateway"
            | b"intermediateCatchEvent"
            | b"intermediateThrowEvent"
            | b"boundaryEvent"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<bpmn:definitions xmlns:bpmn="http://www.omg.org/spec/BPMN/20100524/MODEL"
                  xmlns:bpmndi="http://www.omg.org/spec/BPMN/20100524/DI"
                  xmlns:dc="http://www.omg.org/spec/DD/20100524/DC"
                  id="Definitions_1"
                  targetNamespace="http://bpmn.io/schema/bpmn">
  <bpmn:process id="Process_1" isExecutable="false">
    <bpmn:startEvent id="StartEvent_1" name="Начало">
      <bpmn:outgoing>Flow_1</bpmn:outgoing>
    </bpmn:startEvent>
    <bpmn:task id="Task_1" name="Пример задачи">
      <bpmn:incoming>Flow_1</bpmn:incoming>
      <bpmn:outgoing>Flow_2</bpmn:outgoing>
    </bpmn:task>
    <bpmn:endEvent id="EndEvent_1" name="Конец">
      <bpmn:incoming>Flow_2</bpmn:incoming>
    </bpmn:endEvent>
    <bpmn:sequenceFlow id="Flow_1" sourceRef="StartEvent_1" targetRef="Task_1" />
    <bpmn:sequenceFlow id="Flow_2" sourceRef="Task_1" targetRef="EndEvent_1" />
  </bpmn:process>
  <bpmndi:BPMNDiagram id="BPMNDiagram_1">
    <bpmndi:BPMNPlane id="BPMNPlane_1" bpmnElement="Process_1">
      <bpmndi:BPMNShape id="Task_1_di" bpmnElement="Task_1">
        <dc:Bounds x="250" y="80" width="100" height="80" />
      </bpmndi:BPMNShape>
    </bpmndi:BPMNPlane>
  </bpmndi:BPMNDiagram>
</bpmn:definitions>"#;

    struct Recorder {
        imported: usize,
        fail_with: Option<String>,
    }

    impl Renderer for Recorder {
        fn import_xml(&mut self, _xml: &str) -> std::result::Result<(), String> {
            match self.fail_with.take() {
                Some(reason) => Err(reason),
                None => {
                    self.imported += 1;
                    Ok(())
                }
            }
        }
    }

    #[test]
    fn summarizes_a_plain_document() {
        let summary = inspect(SAMPLE).unwrap();
        assert_eq!(summary.processes, 1);
        assert_eq!(summary.start_events, 1);
        assert_eq!(summary.end_events, 1);
        assert_eq!(summary.flow_nodes, 3);
        assert_eq!(summary.sequence_flows, 2);
        assert_eq!(summary.shapes, 1);
        assert!(summary.dangling_refs.is_empty());
    }

    #[test]
    fn detects_dangling_references() {
        let broken = SAMPLE.replace(r#"targetRef="Task_1""#, r#"targetRef="Task_404""#);
        let summary = inspect(&broken).unwrap();
        assert_eq!(summary.dangling_refs, ["Task_404"]);
    }

    #[test]
    fn cross_pool_message_flows_are_not_dangling() {
        let collaboration = r#"<?xml version="1.0" encoding="UTF-8"?>
<bpmn:definitions xmlns:bpmn="http://www.omg.org/spec/BPMN/20100524/MODEL"
                  id="Definitions_1"
                  targetNamespace="http://bpmn.io/schema/bpmn">
  <bpmn:collaboration id="Collaboration_1">
    <bpmn:participant id="Participant_A" name="Клиент" processRef="Process_1" />
    <bpmn:participant id="Participant_B" name="Поставщик" processRef="Process_2" />
    <bpmn:messageFlow id="MessageFlow_1" sourceRef="Participant_A" targetRef="Participant_B" />
  </bpmn:collaboration>
  <bpmn:process id="Process_1" isExecutable="false" />
  <bpmn:process id="Process_2" isExecutable="false" />
</bpmn:definitions>"#;

        let summary = inspect(collaboration).unwrap();
        assert_eq!(summary.participants, 2);
        assert_eq!(summary.message_flows, 1);
        assert!(summary.dangling_refs.is_empty(), "{:?}", summary.dangling_refs);
    }

    #[test]
    fn rejects_non_bpmn_documents() {
        let err = inspect("<note><to>Tove</to></note>").unwrap_err();
        assert!(matches!(err, Error::NotBpmn(_)));
    }

    #[test]
    fn rejects_malformed_xml() {
        assert!(inspect("<bpmn:definitions><unclosed").is_err());
    }

    #[test]
    fn display_hands_the_document_to_the_renderer() {
        let mut renderer = Recorder { imported: 0, fail_with: None };
        display(SAMPLE, &mut renderer).unwrap();
        assert_eq!(renderer.imported, 1);
    }

    #[test]
    fn renderer_failure_is_an_import_error() {
        let mut renderer = Recorder {
            imported: 0,
            fail_with: Some("unsupported element".into()),
        };
        let err = display(SAMPLE, &mut renderer).unwrap_err();
        assert_eq!(err.to_string(), "import failed: unsupported element");
    }
}
