//! Inputs handed to rules.

use crate::catalog::BlockCatalog;
use crate::state::BlockState;
use blockplace_core::{
    horizontal_direction_from_yaw, BlockFace, BlockPos, Direction, Pose,
};
use glam::DVec3;

/// Cursor hit point used when the caller did not supply one.
pub const CURSOR_CENTER: DVec3 = DVec3::new(0.5, 0.5, 0.5);

/// Everything a rule knows about a placement attempt.
#[derive(Clone, Copy)]
pub struct PlacementContext<'a> {
    /// Target cell.
    pub position: BlockPos,
    /// Default state of the block being placed.
    pub block: &'a BlockState,
    /// Placing actor, when known.
    pub pose: Option<Pose>,
    /// Clicked face, when known.
    pub face: Option<BlockFace>,
    /// Hit point inside the clicked cell, each axis in `[0, 1]`.
    pub cursor: Option<DVec3>,
    /// Whether the actor is sneaking.
    pub sneaking: bool,
    /// Registry capability.
    pub catalog: &'a dyn BlockCatalog,
}

impl<'a> PlacementContext<'a> {
    /// Context with no pose, face or cursor.
    pub fn new(position: BlockPos, block: &'a BlockState, catalog: &'a dyn BlockCatalog) -> Self {
        Self {
            position,
            block,
            pose: None,
            face: None,
            cursor: None,
            sneaking: false,
            catalog,
        }
    }

    /// Set the actor pose.
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = Some(pose);
        self
    }

    /// Set the clicked face.
    pub fn with_face(mut self, face: BlockFace) -> Self {
        self.face = Some(face);
        self
    }

    /// Set the cursor hit point.
    pub fn with_cursor(mut self, cursor: DVec3) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Set the sneaking flag.
    pub fn with_sneaking(mut self, sneaking: bool) -> Self {
        self.sneaking = sneaking;
        self
    }

    /// Clicked face, defaulting to the top face.
    pub fn face_or_top(&self) -> BlockFace {
        self.face.unwrap_or(BlockFace::Top)
    }

    /// Cursor hit point, defaulting to the cell center.
    pub fn cursor_or_center(&self) -> DVec3 {
        self.cursor.unwrap_or(CURSOR_CENTER)
    }

    /// Actor yaw, or 0° (south) without a pose.
    pub fn yaw_or_zero(&self) -> f32 {
        self.pose.map(|p| p.yaw).unwrap_or(0.0)
    }

    /// Actor's horizontal direction from yaw, or 0° without a pose.
    pub fn yaw_direction(&self) -> Direction {
        horizontal_direction_from_yaw(self.yaw_or_zero())
    }

    /// Actor's horizontal direction, or north without a pose.
    pub fn direction_or_north(&self) -> Direction {
        self.pose
            .map(|p| p.horizontal_direction())
            .unwrap_or(Direction::North)
    }
}

impl std::fmt::Debug for PlacementContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacementContext")
            .field("position", &self.position)
            .field("block", &self.block.to_string())
            .field("pose", &self.pose)
            .field("face", &self.face)
            .field("cursor", &self.cursor)
            .field("sneaking", &self.sneaking)
            .finish_non_exhaustive()
    }
}

/// Everything a rule knows when a neighbor changed.
#[derive(Clone, Copy)]
pub struct UpdateContext<'a> {
    /// Cell being re-validated.
    pub position: BlockPos,
    /// State currently in the cell.
    pub current: &'a BlockState,
    /// Face of this cell the change arrived through.
    pub from_face: BlockFace,
    /// Registry capability.
    pub catalog: &'a dyn BlockCatalog,
}

impl<'a> UpdateContext<'a> {
    /// Build an update context.
    pub fn new(
        position: BlockPos,
        current: &'a BlockState,
        from_face: BlockFace,
        catalog: &'a dyn BlockCatalog,
    ) -> Self {
        Self {
            position,
            current,
            from_face,
            catalog,
        }
    }

    /// Direction from this cell towards the changed neighbor.
    pub fn from_direction(&self) -> Direction {
        self.from_face.to_direction()
    }
}

impl std::fmt::Debug for UpdateContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateContext")
            .field("position", &self.position)
            .field("current", &self.current.to_string())
            .field("from_face", &self.from_face)
            .finish_non_exhaustive()
    }
}
