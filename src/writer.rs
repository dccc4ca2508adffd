//! BPMN 2.0 serialization. Walks the process model and emits a definitions
//! document with a collaboration, one process holding the linear start-to-end
//! chain, and the diagram interchange section.
//!
//! The document shape matches what bpmn.io style tooling accepts: lanes are
//! written as nested `participant` elements inside their pool's participant,
//! and the `Flow_<n>` numbering is 1-based over the whole chain. Gateways in
//! the chain keep a single incoming and a single outgoing flow.

mod layout;

use crate::{
    error::Result,
    model::{Decision, ProcessModel, Task},
};
use log::info;
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::{
    io::Write,
    sync::atomic::{AtomicU64, Ordering},
};

const START_EVENT_ID: &str = "StartEvent_1";
const END_EVENT_ID: &str = "EndEvent_1";
const START_EVENT_NAME: &str = "Начало процесса";
const END_EVENT_NAME: &str = "Конец процесса";

// Participant processRef attributes occupy Process_1, Process_2, ... so the
// generation counter starts above that range. fetch_add keeps ids unique
// across concurrent generations within one process.
static GENERATION_SEQ: AtomicU64 = AtomicU64::new(1000);

/// Serialize the model into a BPMN 2.0 XML string. Deterministic apart from
/// the sequence number baked into the process and collaboration ids.
pub(crate) fn write_definitions(model: &ProcessModel) -> Result<String> {
    let seq = GENERATION_SEQ.fetch_add(1, Ordering::Relaxed);
    let process_id = format!("Process_{seq}");
    let collaboration_id = format!("Collaboration_{seq}");

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    start_element(
        &mut writer,
        "bpmn:definitions",
        &[
            ("xmlns:bpmn", "http://www.omg.org/spec/BPMN/20100524/MODEL"),
            ("xmlns:bpmndi", "http://www.omg.org/spec/BPMN/20100524/DI"),
            ("xmlns:dc", "http://www.omg.org/spec/DD/20100524/DC"),
            ("xmlns:di", "http://www.omg.org/spec/DD/20100524/DI"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
            ("id", "Definitions_1"),
            ("targetNamespace", "http://bpmn.io/schema/bpmn"),
            ("exporter", env!("CARGO_PKG_NAME")),
            ("exporterVersion", env!("CARGO_PKG_VERSION")),
        ],
    )?;

    write_collaboration(&mut writer, model, &collaboration_id)?;
    write_process(&mut writer, model, &process_id)?;
    write_diagram(&mut writer, model, &collaboration_id)?;

    end_element(&mut writer, "bpmn:definitions")?;

    info!(
        "serialized {} tasks, {} decisions, {} pools into {process_id}",
        model.tasks.len(),
        model.decisions.len(),
        model.pools.len()
    );
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

fn write_collaboration<W: Write>(
    writer: &mut Writer<W>,
    model: &ProcessModel,
    collaboration_id: &str,
) -> Result<()> {
    start_element(writer, "bpmn:collaboration", &[("id", collaboration_id)])?;

    for (index, pool) in model.pools.iter().enumerate() {
        let process_ref = format!("Process_{}", index + 1);
        start_element(
            writer,
            "bpmn:participant",
            &[
                ("id", &pool.id),
                ("name", &pool.name),
                ("processRef", &process_ref),
            ],
        )?;

        // Lanes nest as further participant elements inside the pool.
        if !pool.lanes.is_empty() {
            let lanes_id = format!("{}_Lanes", pool.id);
            start_element(
                writer,
                "bpmn:participant",
                &[("id", &lanes_id), ("name", &pool.name)],
            )?;
            for lane in &pool.lanes {
                empty_element(
                    writer,
                    "bpmn:participant",
                    &[("id", &lane.id), ("name", &lane.name)],
                )?;
            }
            end_element(writer, "bpmn:participant")?;
        }

        end_element(writer, "bpmn:participant")?;
    }

    for flow in &model.message_flows {
        empty_element(
            writer,
            "bpmn:messageFlow",
            &[
                ("id", &flow.id),
                ("sourceRef", &flow.source_ref),
                ("targetRef", &flow.target_ref),
            ],
        )?;
    }

    end_element(writer, "bpmn:collaboration")
}

fn write_process<W: Write>(
    writer: &mut Writer<W>,
    model: &ProcessModel,
    process_id: &str,
) -> Result<()> {
    start_element(
        writer,
        "bpmn:process",
        &[("id", process_id), ("isExecutable", "false")],
    )?;

    start_element(
        writer,
        "bpmn:startEvent",
        &[("id", START_EVENT_ID), ("name", START_EVENT_NAME)],
    )?;
    text_element(writer, "bpmn:outgoing", "Flow_1")?;
    end_element(writer, "bpmn:startEvent")?;

    for (index, task) in model.tasks.iter().enumerate() {
        write_flow_node(
            writer,
            &format!("bpmn:{}", task.task_type),
            &task.id,
            &task.name,
            index,
        )?;
    }

    for (index, decision) in model.decisions.iter().enumerate() {
        write_flow_node(
            writer,
            &format!("bpmn:{}", decision.gateway_type),
            &decision.id,
            &decision.name,
            model.tasks.len() + index,
        )?;
    }

    write_sequence_flows(writer, model)?;

    let total = model.element_count();
    start_element(
        writer,
        "bpmn:endEvent",
        &[("id", END_EVENT_ID), ("name", END_EVENT_NAME)],
    )?;
    text_element(writer, "bpmn:incoming", &format!("Flow_{}", total + 1))?;
    end_element(writer, "bpmn:endEvent")?;

    end_element(writer, "bpmn:process")
}

// A chain element at `position` is wired between Flow_<position+1> and
// Flow_<position+2>.
fn write_flow_node<W: Write>(
    writer: &mut Writer<W>,
    element: &str,
    id: &str,
    name: &str,
    position: usize,
) -> Result<()> {
    start_element(writer, element, &[("id", id), ("name", name)])?;
    text_element(writer, "bpmn:incoming", &format!("Flow_{}", position + 1))?;
    text_element(writer, "bpmn:outgoing", &format!("Flow_{}", position + 2))?;
    end_element(writer, element)
}

// One linear chain: start event, all tasks, all decisions, end event. With
// zero elements this degenerates to a single Flow_1 from start to end.
fn write_sequence_flows<W: Write>(writer: &mut Writer<W>, model: &ProcessModel) -> Result<()> {
    let total = model.element_count();
    for i in 0..=total {
        let source = if i == 0 {
            START_EVENT_ID
        } else {
            chain_element_id(model, i - 1)
        };
        let target = if i == total {
            END_EVENT_ID
        } else {
            chain_element_id(model, i)
        };
        empty_element(
            writer,
            "bpmn:sequenceFlow",
            &[
                ("id", &format!("Flow_{}", i + 1)),
                ("sourceRef", source),
                ("targetRef", target),
            ],
        )?;
    }
    Ok(())
}

// Tasks first, then decisions, regardless of source order.
fn chain_element_id(model: &ProcessModel, position: usize) -> &str {
    if position < model.tasks.len() {
        &model.tasks[position].id
    } else {
        &model.decisions[position - model.tasks.len()].id
    }
}

fn write_diagram<W: Write>(
    writer: &mut Writer<W>,
    model: &ProcessModel,
    collaboration_id: &str,
) -> Result<()> {
    start_element(writer, "bpmndi:BPMNDiagram", &[("id", "BPMNDiagram_1")])?;
    start_element(
        writer,
        "bpmndi:BPMNPlane",
        &[("id", "BPMNPlane_1"), ("bpmnElement", collaboration_id)],
    )?;

    for (pool_index, pool) in model.pools.iter().enumerate() {
        let y = layout::pool_y(pool_index);
        let height = layout::pool_height(pool);
        write_shape(writer, &pool.id, layout::POOL_X, y, layout::POOL_WIDTH, height)?;

        if !pool.lanes.is_empty() {
            let width = layout::lane_width(pool.lanes.len());
            for (lane_index, lane) in pool.lanes.iter().enumerate() {
                write_shape(writer, &lane.id, layout::lane_x(lane_index, width), y, width, height)?;
            }
        }
    }

    write_shape(
        writer,
        START_EVENT_ID,
        layout::START_X,
        layout::EVENT_Y,
        layout::EVENT_SIZE,
        layout::EVENT_SIZE,
    )?;

    for (index, task) in model.tasks.iter().enumerate() {
        write_task_shape(writer, model, task, index)?;
    }
    for (index, decision) in model.decisions.iter().enumerate() {
        write_decision_shape(writer, decision, model.tasks.len() + index)?;
    }

    write_shape(
        writer,
        END_EVENT_ID,
        layout::chain_x(model.element_count()),
        layout::EVENT_Y,
        layout::EVENT_SIZE,
        layout::EVENT_SIZE,
    )?;

    end_element(writer, "bpmndi:BPMNPlane")?;
    end_element(writer, "bpmndi:BPMNDiagram")
}

fn write_task_shape<W: Write>(
    writer: &mut Writer<W>,
    model: &ProcessModel,
    task: &Task,
    position: usize,
) -> Result<()> {
    write_shape(
        writer,
        &task.id,
        layout::chain_x(position),
        layout::task_y(task, &model.pools),
        layout::TASK_WIDTH,
        layout::TASK_HEIGHT,
    )
}

fn write_decision_shape<W: Write>(
    writer: &mut Writer<W>,
    decision: &Decision,
    position: usize,
) -> Result<()> {
    write_shape(
        writer,
        &decision.id,
        layout::chain_x(position),
        layout::GATEWAY_Y,
        layout::GATEWAY_SIZE,
        layout::GATEWAY_SIZE,
    )
}

fn write_shape<W: Write>(
    writer: &mut Writer<W>,
    element: &str,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<()> {
    let shape_id = format!("{element}_di");
    start_element(
        writer,
        "bpmndi:BPMNShape",
        &[("id", &shape_id), ("bpmnElement", element)],
    )?;
    empty_element(
        writer,
        "dc:Bounds",
        &[
            ("x", &x.to_string()),
            ("y", &y.to_string()),
            ("width", &width.to_string()),
            ("height", &height.to_string()),
        ],
    )?;
    end_element(writer, "bpmndi:BPMNShape")
}

// The helpers below go through quick-xml events, which escape attribute
// values and text on write.

fn start_element<W: Write>(writer: &mut Writer<W>, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut element = BytesStart::new(name);
    for attr in attrs {
        element.push_attribute(*attr);
    }
    writer.write_event(Event::Start(element))?;
    Ok(())
}

fn empty_element<W: Write>(writer: &mut Writer<W>, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut element = BytesStart::new(name);
    for attr in attrs {
        element.push_attribute(*attr);
    }
    writer.write_event(Event::Empty(element))?;
    Ok(())
}

fn end_element<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    start_element(writer, name, &[])?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    end_element(writer, name)
}
