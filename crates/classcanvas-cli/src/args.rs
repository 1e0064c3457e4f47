//! Command-line argument definitions for the ClassCanvas CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global options select the store, the configuration file
//! and logging verbosity; the [`Command`] says what to do with the stored
//! diagram.

use clap::{Parser, Subcommand};

use classcanvas::{
    anchor::Direction,
    semantic::{EntityKind, RelationshipKind},
};

/// Command-line arguments for the ClassCanvas diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding the stored diagram
    #[arg(short, long, global = true)]
    pub store: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the stored diagram to an SVG file
    Render {
        /// Path to the output SVG file
        #[arg(short, long, default_value = "out.svg")]
        output: String,
    },

    /// Print the routed path of every edge
    Routes,

    /// Print the eight anchors of a node
    Anchors {
        /// Node id
        node: String,
    },

    /// Print the anchor of a node nearest to a canvas point
    #[command(allow_negative_numbers = true)]
    Nearest {
        /// Node id
        node: String,
        x: f32,
        y: f32,
    },

    /// Add an empty entity
    #[command(allow_negative_numbers = true)]
    AddNode {
        /// Entity name
        name: String,

        /// Entity kind (class, interface, enum, abstract, exception)
        #[arg(short, long, default_value = "class")]
        kind: EntityKind,

        #[arg(long, default_value_t = 0.0)]
        x: f32,

        #[arg(long, default_value_t = 0.0)]
        y: f32,
    },

    /// Connect two nodes
    Connect {
        /// Source node id
        from: String,

        /// Target node id
        to: String,

        /// Relationship kind (association, inheritance, realization,
        /// composition, aggregation, dependency)
        #[arg(short, long, default_value = "association")]
        kind: RelationshipKind,

        /// Anchor pinned on the source node (n, ne, e, se, s, sw, w, nw)
        #[arg(long)]
        start_anchor: Option<Direction>,

        /// Anchor pinned on the target node
        #[arg(long)]
        end_anchor: Option<Direction>,

        /// Multiplicity at the source end
        #[arg(long, default_value = "")]
        start_mult: String,

        /// Multiplicity at the target end
        #[arg(long, default_value = "")]
        end_mult: String,
    },

    /// Move a node, snapping it to the grid
    #[command(allow_negative_numbers = true)]
    Move {
        /// Node id
        node: String,
        x: f32,
        y: f32,
    },

    /// Copy a node next to the original
    Duplicate {
        /// Node id
        node: String,
    },

    /// Remove a node and its edges
    RemoveNode {
        /// Node id
        node: String,
    },

    /// Remove an edge
    RemoveEdge {
        /// Edge id
        edge: String,
    },

    /// Delete the stored diagram
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_node_accepts_negative_coordinates() {
        let args = Args::try_parse_from([
            "classcanvas", "add-node", "Ledger", "--x", "-40", "--y", "-20.5",
        ])
        .unwrap();

        let Command::AddNode { name, x, y, .. } = args.command else {
            panic!("Expected add-node");
        };
        assert_eq!(name, "Ledger");
        assert_eq!((x, y), (-40.0, -20.5));
    }

    #[test]
    fn test_move_accepts_negative_coordinates() {
        let args = Args::try_parse_from(["classcanvas", "move", "1", "-95", "-12"]).unwrap();
        assert!(matches!(args.command, Command::Move { x, y, .. } if x == -95.0 && y == -12.0));
    }
}
