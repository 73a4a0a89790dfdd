//! Timeline model: an ordered, non-empty, immutable list of stops.

use std::f32::consts::TAU;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::IsleError;

/// Built-in twelve-stop factory history.
const BUILTIN_TIMELINE: &str = include_str!("../../assets/timeline.toml");

/// Title and description of a stop, as read from a timeline file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryContent {
    /// Short heading shown in the info panel.
    pub title: String,
    /// Body text shown in the info panel.
    #[serde(alias = "content")]
    pub description: String,
}

impl EntryContent {
    /// Content with the given title and description.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// On-disk timeline layout: a list of `[[entry]]` tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TimelineFile {
    #[serde(rename = "entry", default)]
    entries: Vec<EntryContent>,
}

/// Places stops evenly on a horizontal ring, in visiting order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingPlacement {
    /// Ring radius around the island centre.
    pub radius: f32,
    /// Height of each marker above the water plane.
    pub height: f32,
}

impl Default for RingPlacement {
    fn default() -> Self {
        Self {
            radius: 12.0,
            height: 2.0,
        }
    }
}

impl RingPlacement {
    /// Position of stop `index` out of `count`.
    #[must_use]
    pub fn position(&self, index: usize, count: usize) -> Vec3 {
        let angle = index as f32 / count.max(1) as f32 * TAU;
        Vec3::new(
            angle.cos() * self.radius,
            self.height,
            angle.sin() * self.radius,
        )
    }
}

/// One navigable stop.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    title: String,
    description: String,
    world_position: Vec3,
    index: usize,
}

impl TimelineEntry {
    /// Short heading.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Resting world position of the stop's marker.
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        self.world_position
    }

    /// Position in visiting order.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Ordered stops; index order is visiting order and wraps at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    /// Build from content/position pairs. Fails on an empty list.
    pub fn new(
        items: impl IntoIterator<Item = (EntryContent, Vec3)>,
    ) -> Result<Self, IsleError> {
        let entries: Vec<_> = items
            .into_iter()
            .enumerate()
            .map(|(index, (content, world_position))| TimelineEntry {
                title: content.title,
                description: content.description,
                world_position,
                index,
            })
            .collect();
        if entries.is_empty() {
            return Err(IsleError::EmptyTimeline);
        }
        Ok(Self { entries })
    }

    /// Build from content, placing stops on `ring`.
    pub fn on_ring(
        contents: Vec<EntryContent>,
        ring: RingPlacement,
    ) -> Result<Self, IsleError> {
        let count = contents.len();
        Self::new(
            contents
                .into_iter()
                .enumerate()
                .map(|(i, c)| (c, ring.position(i, count))),
        )
    }

    /// Parse a TOML timeline (`[[entry]]` tables with `title` and
    /// `description`) and place it on `ring`.
    pub fn from_toml_str(
        source: &str,
        ring: RingPlacement,
    ) -> Result<Self, IsleError> {
        let file: TimelineFile = toml::from_str(source)
            .map_err(|e| IsleError::TimelineParse(e.to_string()))?;
        Self::on_ring(file.entries, ring)
    }

    /// Load a TOML timeline file.
    pub fn load(path: &Path, ring: RingPlacement) -> Result<Self, IsleError> {
        let source = std::fs::read_to_string(path).map_err(IsleError::Io)?;
        let timeline = Self::from_toml_str(&source, ring)?;
        log::info!(
            "loaded timeline '{}' ({} entries)",
            path.display(),
            timeline.len()
        );
        Ok(timeline)
    }

    /// The built-in factory history.
    pub fn builtin(ring: RingPlacement) -> Result<Self, IsleError> {
        Self::from_toml_str(BUILTIN_TIMELINE, ring)
    }

    /// Serialize titles and descriptions back to TOML.
    pub fn to_toml_string(&self) -> Result<String, IsleError> {
        let file = TimelineFile {
            entries: self
                .entries
                .iter()
                .map(|e| EntryContent::new(e.title.as_str(), e.description.as_str()))
                .collect(),
        };
        toml::to_string_pretty(&file)
            .map_err(|e| IsleError::TimelineParse(e.to_string()))
    }

    /// Number of stops (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stop at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TimelineEntry> {
        self.entries.get(index)
    }

    /// All stops in visiting order.
    #[must_use]
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Iterate over stops in visiting order.
    pub fn iter(&self) -> impl Iterator<Item = &TimelineEntry> + '_ {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_twelve_entries() {
        let timeline = Timeline::builtin(RingPlacement::default()).unwrap();
        assert_eq!(timeline.len(), 12);
        assert_eq!(timeline.get(0).unwrap().title(), "Foundation");
        assert_eq!(timeline.get(11).unwrap().title(), "Future Vision");
        for (i, entry) in timeline.iter().enumerate() {
            assert_eq!(entry.index(), i);
        }
    }

    #[test]
    fn entries_lie_on_ring() {
        let ring = RingPlacement::default();
        let timeline = Timeline::builtin(ring).unwrap();
        for entry in timeline.iter() {
            let p = entry.world_position();
            assert!((p.y - ring.height).abs() < 1e-6);
            assert!((Vec3::new(p.x, 0.0, p.z).length() - ring.radius).abs() < 1e-4);
        }
        let first = timeline.get(0).unwrap().world_position();
        assert!((first - Vec3::new(12.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn empty_timeline_is_rejected() {
        let err = Timeline::on_ring(Vec::new(), RingPlacement::default()).unwrap_err();
        assert!(matches!(err, IsleError::EmptyTimeline));
        let err = Timeline::from_toml_str("", RingPlacement::default()).unwrap_err();
        assert!(matches!(err, IsleError::EmptyTimeline));
    }

    #[test]
    fn legacy_content_key_is_accepted() {
        let src = r#"
[[entry]]
title = "Only"
content = "Legacy key"
"#;
        let timeline = Timeline::from_toml_str(src, RingPlacement::default()).unwrap();
        assert_eq!(timeline.get(0).unwrap().description(), "Legacy key");
    }

    #[test]
    fn malformed_toml_reports_parse_error() {
        let err = Timeline::from_toml_str("[[entry]]\ntitle = 3", RingPlacement::default())
            .unwrap_err();
        assert!(matches!(err, IsleError::TimelineParse(_)));
    }

    #[test]
    fn toml_round_trip_preserves_content() {
        let ring = RingPlacement::default();
        let timeline = Timeline::builtin(ring).unwrap();
        let text = timeline.to_toml_string().unwrap();
        let parsed = Timeline::from_toml_str(&text, ring).unwrap();
        assert_eq!(parsed, timeline);
    }
}
