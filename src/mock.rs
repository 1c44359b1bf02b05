//! Synthetic classroom data for the preview server.
//!
//! Occupancy is derived from a linear congruential hash of the period and the
//! room index, so every period always renders the same picture.

use crate::model::structs::{Building, ClassroomInfo, ClassroomType};

/// (name, capacity, type label) of the 工学馆 rooms shown in previews.
const BASE_CLASSROOMS: &[(&str, u32, &str)] = &[
    ("GX101", 120, "多媒体大教室"),
    ("GX102", 80, "多媒体教室"),
    ("GX103", 60, "普通教室"),
    ("GX201", 100, "多媒体教室"),
    ("GX202", 80, "多媒体教室"),
    ("GX203", 60, "普通教室"),
    ("GX301", 120, "多媒体大教室"),
    ("GX302", 80, "多媒体教室"),
    ("GX303", 60, "普通教室"),
    ("GX401", 100, "多媒体教室"),
    ("GX402", 80, "多媒体教室"),
    ("GX403", 60, "普通教室"),
    ("GX501", 40, "研讨室"),
    ("GX502", 40, "研讨室"),
    ("GX503", 30, "小教室"),
];

pub const MOCK_BUILDING: Building = Building::Engineering;

/// Share of rooms in use: mornings are busiest, evenings quietest.
pub fn occupancy_rate(period: u8) -> f64 {
    match period {
        1..=4 => 0.7,
        5..=8 => 0.5,
        _ => 0.3,
    }
}

fn pseudo_random(period: u8, index: usize) -> f64 {
    let seed = u64::from(period) * 1000 + index as u64;
    ((seed * 9301 + 49297) % 233280) as f64 / 233280.0
}

pub fn mock_classrooms(period: u8) -> Vec<ClassroomInfo> {
    let rate = occupancy_rate(period);
    BASE_CLASSROOMS
        .iter()
        .enumerate()
        .map(|(index, &(name, capacity, room_type))| ClassroomInfo {
            name: name.to_string(),
            capacity,
            room_type: room_type.to_string(),
            building: MOCK_BUILDING.label().to_string(),
            is_free: pseudo_random(period, index) > rate,
        })
        .collect()
}

/// Names of the free rooms, as a real query would return them.
pub fn mock_free_classrooms(period: u8) -> Vec<String> {
    mock_classrooms(period)
        .into_iter()
        .filter(|c| c.is_free)
        .map(|c| c.name)
        .collect()
}

/// Rooms whose type label matches one of the portal's classroom types.
pub fn portal_type(info: &ClassroomInfo) -> Option<ClassroomType> {
    ClassroomType::from_label(&info.room_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_is_deterministic_per_period() {
        assert_eq!(mock_classrooms(3), mock_classrooms(3));
        assert_eq!(mock_classrooms(7).len(), 15);
    }

    #[test]
    fn occupancy_follows_time_of_day() {
        assert_eq!(occupancy_rate(1), 0.7);
        assert_eq!(occupancy_rate(8), 0.5);
        assert_eq!(occupancy_rate(12), 0.3);
    }

    #[test]
    fn free_rooms_match_hash() {
        // period 1 hashes all fall below 0.7
        assert!(mock_free_classrooms(1).is_empty());
        assert_eq!(
            mock_free_classrooms(10),
            ["GX101", "GX102", "GX103", "GX402", "GX403", "GX501", "GX502", "GX503"]
        );
        assert_eq!(mock_classrooms(10)[0].building, "工学馆");
    }

    #[test]
    fn free_list_is_subset_in_order() {
        let all: Vec<String> = mock_classrooms(10).into_iter().map(|c| c.name).collect();
        let free = mock_free_classrooms(10);
        let mut it = all.iter();
        for name in &free {
            assert!(it.any(|n| n == name));
        }
    }

    #[test]
    fn portal_types_resolve_where_known() {
        let rooms = mock_classrooms(1);
        assert_eq!(portal_type(&rooms[0]), Some(ClassroomType::LargeMultimedia));
        assert_eq!(portal_type(&rooms[14]), None);
    }
}
