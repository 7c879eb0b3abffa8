//! Authored level data: JSON in, a live [`Level`] out.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::game::StepContext;
use crate::api::types::BlockContent;
use crate::collision::tile_grid::{RaggedRowsError, TileGrid, TileKind, TILE_SIZE};
use crate::core::level::Level;
use crate::presets;

/// Anything that can go wrong turning authored data into a level.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("invalid level JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    RaggedRows(#[from] RaggedRowsError),
    #[error("tile row {row}, column {col} has unknown tile code {code}")]
    UnknownTile { row: usize, col: usize, code: u8 },
    #[error("declared size {expected_w}x{expected_h} but tile rows are {got_w}x{got_h}")]
    SizeMismatch {
        expected_w: u32,
        expected_h: u32,
        got_w: u32,
        got_h: u32,
    },
    #[error("unknown entity kind {0:?} (expected \"player\" or \"patroller\")")]
    UnknownEntityKind(String),
}

/// An entity placement in authored data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySpawn {
    /// Preset name: "player" or "patroller".
    pub kind: String,
    pub x: f32,
    pub y: f32,
}

/// Authored content of one question/hidden block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockSpawn {
    pub cx: i32,
    pub cy: i32,
    pub content: BlockContent,
}

/// The serialized form of a level: declared dimensions, tile codes in
/// row-major rows, entity placements, and block contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelData {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<Vec<u8>>,
    #[serde(default)]
    pub entities: Vec<EntitySpawn>,
    #[serde(default)]
    pub blocks: Vec<BlockSpawn>,
}

impl LevelData {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Level {
    /// Build a live level from authored data. Entity IDs come from the
    /// context so they never collide with later runtime spawns.
    pub fn from_data(data: &LevelData, ctx: &mut StepContext) -> Result<Self, LevelError> {
        let got_h = data.tiles.len() as u32;
        let got_w = data.tiles.first().map(|r| r.len()).unwrap_or(0) as u32;
        if got_w != data.width || got_h != data.height {
            return Err(LevelError::SizeMismatch {
                expected_w: data.width,
                expected_h: data.height,
                got_w,
                got_h,
            });
        }

        let mut rows = Vec::with_capacity(data.tiles.len());
        for (row, codes) in data.tiles.iter().enumerate() {
            let mut kinds = Vec::with_capacity(codes.len());
            for (col, &code) in codes.iter().enumerate() {
                let kind = TileKind::from_code(code)
                    .ok_or(LevelError::UnknownTile { row, col, code })?;
                kinds.push(kind);
            }
            rows.push(kinds);
        }
        let grid = TileGrid::from_rows(rows, TILE_SIZE)?;

        let mut level = Level::new(grid);
        for block in &data.blocks {
            level.set_block_content(block.cx, block.cy, block.content);
        }
        for spawn in &data.entities {
            let entity = match spawn.kind.as_str() {
                "player" => presets::player(ctx.next_id()),
                "patroller" => presets::patroller(ctx.next_id()),
                other => return Err(LevelError::UnknownEntityKind(other.to_string())),
            };
            level.spawn(entity.with_pos(spawn.x, spawn.y));
        }
        log::info!(
            "loaded level {:?}: {}x{} tiles, {} entities, {} authored blocks",
            data.name,
            data.width,
            data.height,
            data.entities.len(),
            data.blocks.len()
        );
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> String {
        r#"{
            "name": "1-1",
            "width": 4,
            "height": 3,
            "tiles": [
                [0, 0, 3, 0],
                [0, 0, 0, 0],
                [1, 1, 1, 1]
            ],
            "entities": [
                { "kind": "player", "x": 16.0, "y": 16.0 },
                { "kind": "patroller", "x": 48.0, "y": 16.0 }
            ],
            "blocks": [
                { "cx": 2, "cy": 0, "content": "growth" }
            ]
        }"#
        .to_string()
    }

    #[test]
    fn loads_a_complete_level() {
        let data = LevelData::from_json(&sample_json()).unwrap();
        assert_eq!(data.name, "1-1");

        let mut ctx = StepContext::new();
        let level = Level::from_data(&data, &mut ctx).unwrap();
        assert_eq!(level.grid().width(), 4);
        assert_eq!(level.grid().get(2, 0).unwrap().kind, TileKind::Question);
        assert_eq!(level.entities().len(), 2);
        assert_eq!(level.entities()[0].tag, "player");
        assert_eq!(level.entities()[1].tag, "patroller");
    }

    #[test]
    fn block_content_survives_loading() {
        let data = LevelData::from_json(&sample_json()).unwrap();
        let mut ctx = StepContext::new();
        let mut level = Level::from_data(&data, &mut ctx).unwrap();

        level.hit_block(2, 0, false, &mut ctx);
        assert!(ctx.events.iter().any(|e| matches!(
            e,
            crate::api::types::GameEvent::BlockContent {
                content: BlockContent::Growth,
                ..
            }
        )));
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        let data = LevelData {
            name: "broken".into(),
            width: 5,
            height: 3,
            tiles: vec![vec![0; 4], vec![0; 4], vec![0; 4]],
            entities: vec![],
            blocks: vec![],
        };
        let mut ctx = StepContext::new();
        assert!(matches!(
            Level::from_data(&data, &mut ctx),
            Err(LevelError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn rejects_unknown_tile_codes() {
        let data = LevelData {
            name: "broken".into(),
            width: 2,
            height: 1,
            tiles: vec![vec![0, 42]],
            entities: vec![],
            blocks: vec![],
        };
        let mut ctx = StepContext::new();
        let err = Level::from_data(&data, &mut ctx).unwrap_err();
        assert!(matches!(
            err,
            LevelError::UnknownTile {
                row: 0,
                col: 1,
                code: 42
            }
        ));
    }

    #[test]
    fn rejects_unknown_entity_kinds() {
        let data = LevelData {
            name: "broken".into(),
            width: 1,
            height: 1,
            tiles: vec![vec![0]],
            entities: vec![EntitySpawn {
                kind: "dragon".into(),
                x: 0.0,
                y: 0.0,
            }],
            blocks: vec![],
        };
        let mut ctx = StepContext::new();
        assert!(matches!(
            Level::from_data(&data, &mut ctx),
            Err(LevelError::UnknownEntityKind(_))
        ));
    }

    #[test]
    fn malformed_json_reports_the_parse_error() {
        assert!(matches!(
            LevelData::from_json("{ not json"),
            Err(LevelError::Json(_))
        ));
    }
}
