//! Level layout: the initial world state and the shapes that render it
//!
//! The shape table doubles as the dimension provider for the simulation, so
//! geometry never has to ask the rendering layer for sizes.

use std::collections::{HashMap, HashSet};

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{
    Body, Collectible, Dimensions, EntityId, Floater, Mouth, Playfield, Predator, RiverBand, Rules,
    Size, SubmergeCycle, WorldState, validate,
};

/// A rectangle drawn for one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub id: EntityId,
    /// DOM element id of the rendered shape
    pub element_id: String,
    pub width: i32,
    pub height: i32,
    /// CSS fill used until the renderer overrides it
    pub fill: String,
}

impl Shape {
    pub fn new(id: EntityId, element_id: &str, width: i32, height: i32, fill: &str) -> Self {
        Self {
            id,
            element_id: element_id.to_string(),
            width,
            height,
            fill: fill.to_string(),
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Shapes in paint order (later shapes draw on top)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Shape>", into = "Vec<Shape>")]
pub struct ShapeTable {
    shapes: Vec<Shape>,
    index: HashMap<EntityId, usize>,
}

impl From<Vec<Shape>> for ShapeTable {
    fn from(shapes: Vec<Shape>) -> Self {
        let index = shapes.iter().enumerate().map(|(i, s)| (s.id, i)).collect();
        Self { shapes, index }
    }
}

impl From<ShapeTable> for Vec<Shape> {
    fn from(table: ShapeTable) -> Self {
        table.shapes
    }
}

impl ShapeTable {
    pub fn get(&self, id: EntityId) -> Option<&Shape> {
        self.index.get(&id).map(|&i| &self.shapes[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Dimensions for ShapeTable {
    fn size_of(&self, id: EntityId) -> Option<Size> {
        self.get(id).map(Shape::size)
    }
}

/// Complete level description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub playfield: Playfield,
    pub river: RiverBand,
    /// Distance covered by one key press
    pub move_step: i32,
    pub shapes: ShapeTable,
    /// Restored on every death; the player's position here is also the spawn
    pub initial: WorldState,
}

mod ids {
    use crate::sim::EntityId;

    pub const FROG: EntityId = EntityId(0);
    pub const PLANK: EntityId = EntityId(1);
    pub const CAR_A: EntityId = EntityId(2);
    pub const CAR_B: EntityId = EntityId(3);
    pub const TURTLE: EntityId = EntityId(4);
    pub const CROCO: EntityId = EntityId(5);
    pub const ZONES: [EntityId; 4] = [EntityId(6), EntityId(7), EntityId(8), EntityId(9)];
}

impl Level {
    /// The classic one-screen crossing
    pub fn classic() -> Self {
        const ZONE_FILL: &str = "fill: rgb(241,196,15)";
        let zone_names = ["pointA", "pointB", "pointC", "pointD"];
        let zone_xs = [75, 225, 375, 525];

        let mut shapes = vec![
            Shape::new(ids::PLANK, "plank", 200, 75, "fill: rgb(139,69,19)"),
            Shape::new(ids::CAR_A, "carA", 200, 75, "fill: rgb(238,232,170)"),
            Shape::new(ids::CAR_B, "carB", 200, 75, "fill: rgb(238,232,170)"),
            Shape::new(ids::TURTLE, "turtle", 500, 75, "fill: rgb(135,206,235)"),
            Shape::new(ids::CROCO, "croco", 400, 75, "fill: rgb(0,100,0)"),
        ];
        shapes.extend(
            ids::ZONES
                .iter()
                .zip(zone_names)
                .map(|(&id, name)| Shape::new(id, name, 75, 75, ZONE_FILL)),
        );
        // Player last so it paints over everything
        shapes.push(Shape::new(ids::FROG, "froggu", 75, 75, "fill: rgb(0,0,255)"));

        let initial = WorldState {
            player: Body::stationary(ids::FROG, IVec2::new(SPAWN_X, SPAWN_Y)),
            platforms: vec![Body::new(ids::PLANK, IVec2::new(300, 225), IVec2::new(-2, 0))],
            hazards: vec![
                Body::new(ids::CAR_A, IVec2::new(300, 375), IVec2::new(-1, 0)),
                Body::new(ids::CAR_B, IVec2::new(300, 450), IVec2::new(1, 0)),
            ],
            floaters: vec![Floater::new(
                Body::new(ids::TURTLE, IVec2::new(300, 75), IVec2::new(3, 0)),
                SubmergeCycle {
                    period: SUBMERGE_PERIOD,
                    float_duration: FLOAT_DURATION,
                },
            )],
            predators: vec![Predator {
                body: Body::new(ids::CROCO, IVec2::new(300, 150), IVec2::new(1, 0)),
                kill_zone_width: 30,
                mouth: Mouth::Right,
            }],
            collectibles: ids::ZONES
                .iter()
                .zip(zone_xs)
                .map(|(&id, x)| Collectible::new(Body::stationary(id, IVec2::new(x, 0)), ZONE_VALUE))
                .collect(),
            player_died: false,
            score: 0,
            high_score: 0,
        };

        Self {
            name: "classic".to_string(),
            playfield: Playfield::new(FIELD_WIDTH, FIELD_HEIGHT),
            river: RiverBand {
                top: RIVER_TOP,
                bottom: RIVER_BOTTOM,
            },
            move_step: MOVE_STEP,
            shapes: shapes.into(),
            initial,
        }
    }

    /// Parse and validate a level description
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let level: Level = serde_json::from_str(json)?;
        level.validate()?;
        log::info!("Loaded level '{}' ({} shapes)", level.name, level.shapes.len());
        Ok(level)
    }

    /// Reject layouts the simulation cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.move_step <= 0 {
            return Err(ConfigError::Invalid {
                field: "move_step",
                reason: format!("must be positive, got {}", self.move_step),
            });
        }
        if self.river.top >= self.river.bottom {
            return Err(ConfigError::Invalid {
                field: "river",
                reason: format!("empty band [{}, {})", self.river.top, self.river.bottom),
            });
        }
        if self.shapes.index.len() != self.shapes.len() {
            return Err(ConfigError::Invalid {
                field: "shapes",
                reason: "two shapes share an entity id".to_string(),
            });
        }
        let mut elements = HashSet::new();
        if let Some(dup) = self.shapes.iter().find(|s| !elements.insert(s.element_id.as_str())) {
            return Err(ConfigError::Invalid {
                field: "shapes",
                reason: format!("element id '{}' is used more than once", dup.element_id),
            });
        }
        if self.initial.player_died {
            return Err(ConfigError::Invalid {
                field: "initial.player_died",
                reason: "a level cannot start with a dead player".to_string(),
            });
        }
        validate(&self.initial, &self.shapes, self.playfield)?;
        Ok(())
    }

    /// Where the player starts and returns to after scoring
    pub fn spawn(&self) -> IVec2 {
        self.initial.player.pos
    }

    pub fn rules(&self, speed_step: i32) -> Rules {
        Rules {
            playfield: self.playfield,
            spawn: self.spawn(),
            river: self.river,
            speed_step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    const TINY: &str = r#"{
        "name": "tiny",
        "playfield": { "width": 300, "height": 300 },
        "river": { "top": 75, "bottom": 150 },
        "move_step": 75,
        "shapes": [
            { "id": 1, "element_id": "log", "width": 150, "height": 75, "fill": "fill: brown" },
            { "id": 0, "element_id": "frog", "width": 75, "height": 75, "fill": "fill: blue" }
        ],
        "initial": {
            "player": { "id": 0, "pos": [150, 225] },
            "platforms": [ { "id": 1, "pos": [0, 75], "vel": [2, 0] } ]
        }
    }"#;

    #[test]
    fn test_classic_layout() {
        let level = Level::classic();
        assert!(level.validate().is_ok());
        assert_eq!(level.spawn(), IVec2::new(300, 525));
        assert_eq!(level.shapes.len(), 10);
        assert_eq!(level.shapes.iter().last().map(|s| s.id), Some(ids::FROG));
        assert_eq!(level.shapes.size_of(ids::TURTLE), Some(Size::new(500, 75)));
        assert_eq!(level.initial.collectibles.len(), 4);
        assert!(level.initial.collectibles.iter().all(|c| c.value == 10 && !c.claimed));
    }

    #[test]
    fn test_load_level_from_json() {
        let level = Level::from_json(TINY).unwrap();
        assert_eq!(level.name, "tiny");
        assert_eq!(level.spawn(), IVec2::new(150, 225));
        assert_eq!(level.initial.platforms[0].vel, IVec2::new(2, 0));
        assert!(level.initial.hazards.is_empty());
        assert_eq!(level.shapes.get(EntityId(1)).map(|s| s.element_id.as_str()), Some("log"));
        assert_eq!(level.rules(3).speed_step, 3);
    }

    #[test]
    fn test_level_with_unknown_shape_rejected() {
        let json = TINY.replace(r#""id": 1, "pos""#, r#""id": 7, "pos""#);
        assert!(matches!(
            Level::from_json(&json),
            Err(ConfigError::Level(SimError::MissingDimensions { id: EntityId(7) }))
        ));
    }

    #[test]
    fn test_malformed_level_rejected() {
        assert!(matches!(Level::from_json("{"), Err(ConfigError::Parse(_))));
        let json = TINY.replace(r#""move_step": 75"#, r#""move_step": 0"#);
        assert!(matches!(
            Level::from_json(&json),
            Err(ConfigError::Invalid { field: "move_step", .. })
        ));
    }

    #[test]
    fn test_duplicate_element_ids_rejected() {
        let mut level = Level::classic();
        let mut shapes: Vec<Shape> = level.shapes.iter().cloned().collect();
        shapes[1].element_id = shapes[0].element_id.clone();
        level.shapes = ShapeTable::from(shapes);
        assert!(matches!(
            level.validate(),
            Err(ConfigError::Invalid { field: "shapes", .. })
        ));
    }

    #[test]
    fn test_level_cannot_start_dead() {
        let json = TINY.replace(
            r#""player": { "id": 0, "pos": [150, 225] },"#,
            r#""player": { "id": 0, "pos": [150, 225] }, "player_died": true,"#,
        );
        assert!(matches!(
            Level::from_json(&json),
            Err(ConfigError::Invalid { field: "initial.player_died", .. })
        ));
    }
}
