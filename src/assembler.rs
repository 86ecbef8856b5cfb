use std::collections::HashMap;

use crate::error::TransectError;
use crate::survey_types::{Line, Waypoint};

/// Attribute that decides which line a waypoint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Name,
    Key,
}

impl GroupKey {
    fn of(self, waypoint: &Waypoint) -> &str {
        match self {
            Self::Name => &waypoint.name,
            Self::Key => &waypoint.key,
        }
    }
}

/// Attribute that orders the vertices of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKey {
    Location,
    Offset,
}

impl OrderKey {
    fn compare(self, a: &Waypoint, b: &Waypoint) -> std::cmp::Ordering {
        match self {
            Self::Location => a.location.cmp(&b.location),
            Self::Offset => a.offset_km.total_cmp(&b.offset_km),
        }
    }
}

/// Group waypoints into lines.
///
/// Groups come out in the order their key is first seen in `waypoints`.
/// Within a group the vertices keep input order unless `order_by` is given,
/// in which case they are stably sorted by it. A group with fewer than two
/// vertices yields `InsufficientPoints` in its slot without affecting the
/// other groups.
pub fn assemble(
    waypoints: &[Waypoint],
    group_by: GroupKey,
    order_by: Option<OrderKey>,
) -> Vec<Result<Line, TransectError>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&Waypoint>)> = Vec::new();

    for waypoint in waypoints {
        let key = group_by.of(waypoint);
        match index.get(key) {
            Some(&slot) => groups[slot].1.push(waypoint),
            None => {
                index.insert(key, groups.len());
                groups.push((key, vec![waypoint]));
            }
        }
    }

    groups
        .into_iter()
        .map(|(key, mut members)| {
            if let Some(order) = order_by {
                members.sort_by(|a, b| order.compare(a, b));
            }
            to_line(key, &members)
        })
        .collect()
}

fn to_line(key: &str, members: &[&Waypoint]) -> Result<Line, TransectError> {
    if members.len() < 2 {
        return Err(TransectError::InsufficientPoints {
            key: key.to_string(),
            count: members.len(),
        });
    }

    let first = members[0];
    Ok(Line {
        key: key.to_string(),
        kind: first.kind,
        name: first.name.clone(),
        region: first.region.clone(),
        position: first.position.clone(),
        points: members.iter().map(|wp| wp.point).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey_types::{GeoPoint, Location, TransectKind};

    fn wp(name: &str, key: &str, location: Location, offset_km: f64, lat: f64) -> Waypoint {
        Waypoint {
            point: GeoPoint::new(lat, 0.0),
            name: name.to_string(),
            region: "R".to_string(),
            kind: TransectKind::Baseline,
            location,
            position: None,
            offset_km,
            key: key.to_string(),
        }
    }

    #[test]
    fn test_first_seen_group_order() {
        let input = vec![
            wp("Zulu", "Zulu Start", Location::Start, 0.0, 1.0),
            wp("Alpha", "Alpha Start", Location::Start, 0.0, 2.0),
            wp("Zulu", "Zulu End", Location::End, 0.1, 3.0),
            wp("Alpha", "Alpha End", Location::End, 0.1, 4.0),
        ];
        let lines: Vec<Line> = assemble(&input, GroupKey::Name, None)
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();

        let keys: Vec<&str> = lines.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["Zulu", "Alpha"]);
        assert_eq!(lines[0].points, vec![GeoPoint::new(1.0, 0.0), GeoPoint::new(3.0, 0.0)]);
    }

    #[test]
    fn test_order_by_location() {
        let input = vec![
            wp("A", "A End", Location::End, 0.1, 9.0),
            wp("A", "A Start", Location::Start, 0.0, 1.0),
        ];
        let lines = assemble(&input, GroupKey::Name, Some(OrderKey::Location));
        let line = lines[0].as_ref().unwrap();
        assert_eq!(line.points[0].lat, 1.0);
        assert_eq!(line.points[1].lat, 9.0);
    }

    #[test]
    fn test_stable_sort_keeps_input_order_on_ties() {
        let input = vec![
            wp("A", "k", Location::Start, 0.0, 1.0),
            wp("A", "k", Location::End, 0.0, 2.0),
            wp("A", "k", Location::Start, 0.0, 3.0),
        ];
        let lines = assemble(&input, GroupKey::Key, Some(OrderKey::Location));
        let lats: Vec<f64> = lines[0].as_ref().unwrap().points.iter().map(|p| p.lat).collect();
        assert_eq!(lats, vec![1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_order_by_offset() {
        let input = vec![
            wp("A", "k", Location::Start, 0.3, 3.0),
            wp("A", "k", Location::Start, 0.1, 1.0),
            wp("A", "k", Location::Start, 0.2, 2.0),
        ];
        let lines = assemble(&input, GroupKey::Key, Some(OrderKey::Offset));
        let lats: Vec<f64> = lines[0].as_ref().unwrap().points.iter().map(|p| p.lat).collect();
        assert_eq!(lats, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_insufficient_points_only_fails_its_group() {
        let input = vec![
            wp("A", "A Start", Location::Start, 0.0, 1.0),
            wp("B", "B Start", Location::Start, 0.0, 2.0),
            wp("A", "A End", Location::End, 0.1, 3.0),
        ];
        let lines = assemble(&input, GroupKey::Name, Some(OrderKey::Location));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].is_ok());
        match &lines[1] {
            Err(TransectError::InsufficientPoints { key, count }) => {
                assert_eq!(key, "B");
                assert_eq!(*count, 1);
            }
            other => panic!("Expected InsufficientPoints, got {other:?}"),
        }
    }

    #[test]
    fn test_repeatable() {
        let input = vec![
            wp("B", "B Start", Location::Start, 0.0, 1.0),
            wp("A", "A Start", Location::Start, 0.0, 2.0),
            wp("A", "A End", Location::End, 0.1, 3.0),
            wp("B", "B End", Location::End, 0.1, 4.0),
        ];
        let first = assemble(&input, GroupKey::Name, Some(OrderKey::Location));
        let second = assemble(&input, GroupKey::Name, Some(OrderKey::Location));
        let first: Vec<Line> = first.into_iter().map(Result::unwrap).collect();
        let second: Vec<Line> = second.into_iter().map(Result::unwrap).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        assert!(assemble(&[], GroupKey::Key, None).is_empty());
    }
}
