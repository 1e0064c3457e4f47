//! CLI logic for the ClassCanvas diagram tool.
//!
//! Every command loads the stored diagram, applies itself, and saves the
//! result back when it changed something.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::io::{self, Write};

use log::info;

use classcanvas::{
    Canvas, CanvasError,
    anchor::AnchorPoint,
    diagram::Diagram,
    geometry::Point,
    semantic::{EdgeId, Node, NodeId},
};

/// Run the ClassCanvas CLI application, printing to standard output
///
/// # Errors
///
/// Returns `CanvasError` for:
/// - Configuration loading errors
/// - Storage I/O errors
/// - Unknown node or edge ids
/// - Invalid edits
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), CanvasError> {
    let stdout = io::stdout();
    run_with_output(args, &mut stdout.lock())
}

/// Run the ClassCanvas CLI application, printing to `out`
pub fn run_with_output(args: &Args, out: &mut impl Write) -> Result<(), CanvasError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let store_dir = config::store_directory(args.store.as_ref(), &app_config);
    info!(store = store_dir.display().to_string(), command:? = args.command; "Processing command");

    let canvas = Canvas::new(app_config);
    let mut store = canvas.open_store(&store_dir);

    if let Command::Clear = args.command {
        store.clear()?;
        writeln!(out, "Cleared {}", store_dir.display())?;
        return Ok(());
    }

    let mut diagram = store.load()?;
    let changed = execute(&canvas, &mut diagram, &args.command, out)?;

    if changed {
        store.save(&diagram)?;
    }

    Ok(())
}

/// Applies one command to `diagram`. Returns whether the diagram changed.
fn execute(
    canvas: &Canvas,
    diagram: &mut Diagram,
    command: &Command,
    out: &mut impl Write,
) -> Result<bool, CanvasError> {
    let geometry = canvas.config().geometry();
    let grid_size = canvas.config().canvas().grid_size();

    match command {
        Command::Render { output } => {
            canvas.export_svg(diagram, output)?;
            info!(output_file = output; "SVG exported successfully");
            writeln!(out, "Wrote {output}")?;
            Ok(false)
        }
        Command::Routes => {
            for routed in diagram.routes(&canvas.router()) {
                let edge = routed.edge();
                let path = routed.path();
                if path.is_empty() {
                    writeln!(out, "{} {} -> {} (unrouted)", edge.id, edge.from, edge.to)?;
                } else {
                    writeln!(
                        out,
                        "{} {} {} -> {} [{} -> {}] {}",
                        edge.id,
                        edge.kind,
                        edge.from,
                        edge.to,
                        anchor_label(path.start()),
                        anchor_label(path.end()),
                        path.path_data()
                    )?;
                }
            }
            Ok(false)
        }
        Command::Anchors { node } => {
            let node = find_node(diagram, node)?;
            for anchor in geometry.anchors(node.position()).iter() {
                writeln!(out, "{} {} {}", anchor.direction(), anchor.x(), anchor.y())?;
            }
            Ok(false)
        }
        Command::Nearest { node, x, y } => {
            let node = find_node(diagram, node)?;
            let anchor = geometry.nearest_anchor(node.position(), Point::new(*x, *y));
            writeln!(out, "{} {} {}", anchor.direction(), anchor.x(), anchor.y())?;
            Ok(false)
        }
        Command::AddNode { name, kind, x, y } => {
            let position = Point::new(*x, *y);
            let id = diagram.add_node(name, *kind, position)?;
            diagram.move_node(&id, position, grid_size)?;
            writeln!(out, "{id}")?;
            Ok(true)
        }
        Command::Connect {
            from,
            to,
            kind,
            start_anchor,
            end_anchor,
            start_mult,
            end_mult,
        } => {
            let id = diagram.add_edge(
                &NodeId::new(from.as_str()),
                &NodeId::new(to.as_str()),
                *kind,
                *start_anchor,
                *end_anchor,
            )?;
            if !start_mult.is_empty() || !end_mult.is_empty() {
                diagram.update_edge(&id, |edge| {
                    edge.start_mult = start_mult.clone();
                    edge.end_mult = end_mult.clone();
                })?;
            }
            writeln!(out, "{id}")?;
            Ok(true)
        }
        Command::Move { node, x, y } => {
            let snapped =
                diagram.move_node(&NodeId::new(node.as_str()), Point::new(*x, *y), grid_size)?;
            writeln!(out, "{node} {} {}", snapped.x(), snapped.y())?;
            Ok(true)
        }
        Command::Duplicate { node } => {
            let id = diagram.duplicate_node(&NodeId::new(node.as_str()))?;
            writeln!(out, "{id}")?;
            Ok(true)
        }
        Command::RemoveNode { node } => {
            diagram.remove_node(&NodeId::new(node.as_str()))?;
            Ok(true)
        }
        Command::RemoveEdge { edge } => {
            diagram.remove_edge(&EdgeId::new(edge.as_str()))?;
            Ok(true)
        }
        Command::Clear => Ok(false),
    }
}

fn find_node<'a>(diagram: &'a Diagram, id: &str) -> Result<&'a Node, CanvasError> {
    let id = NodeId::new(id);
    diagram.node(&id).ok_or(CanvasError::NodeNotFound(id))
}

fn anchor_label(anchor: Option<AnchorPoint>) -> &'static str {
    anchor.map_or("-", |anchor| anchor.direction().as_str())
}
