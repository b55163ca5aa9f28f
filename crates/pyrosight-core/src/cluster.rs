//! Proximity grouping of hotspots into ranked spray targets.
//!
//! Grouping is greedy and seed-relative: each ungrouped hotspot (in id order)
//! seeds a group and absorbs every later ungrouped hotspot whose approximate
//! world position lies strictly closer than the grouping distance to the seed.
//! Members are never compared with each other, so the result is not a
//! transitive closure.

use serde::Serialize;
use tracing::debug;

use crate::projection::{distance_3d, Point2, Point3};
use crate::segment::HotSpot;

/// A ranked aim point formed by one or more hotspots.
#[derive(Clone, Debug, Serialize)]
pub struct SprayTarget {
    /// Sequential per clustering pass, in formation order.
    pub id: usize,
    /// Mean of member pixel centroids.
    pub aim_pixel_point: Point2,
    /// Mean of member world positions, or the origin when no member projected.
    pub approx_world_aim_point: Point3,
    /// Ids of the hotspots forming this target, seed first.
    pub member_hotspot_ids: Vec<usize>,
    /// Sum of area x peak temperature over members.
    pub severity: f64,
}

/// Group hotspots and rank the groups by descending severity.
///
/// Every input hotspot ends up in exactly one target. Ties in severity keep
/// formation order.
pub fn cluster(hotspots: &[HotSpot], max_grouping_distance: f64) -> Vec<SprayTarget> {
    if hotspots.is_empty() {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..hotspots.len()).collect();
    order.sort_by_key(|&i| hotspots[i].id);

    let mut grouped = vec![false; hotspots.len()];
    let mut targets = Vec::new();

    for (pos, &seed_idx) in order.iter().enumerate() {
        if grouped[seed_idx] {
            continue;
        }
        grouped[seed_idx] = true;
        let seed = &hotspots[seed_idx];
        let mut members = vec![seed];

        for &candidate_idx in &order[pos + 1..] {
            if grouped[candidate_idx] {
                continue;
            }
            let candidate = &hotspots[candidate_idx];
            if distance_3d(&seed.approx_world_position, &candidate.approx_world_position)
                < max_grouping_distance
            {
                grouped[candidate_idx] = true;
                members.push(candidate);
            }
        }

        targets.push(aggregate(targets.len(), &members));
    }

    // Stable: equal severities stay in formation order.
    targets.sort_by(|a, b| b.severity.total_cmp(&a.severity));

    debug!(
        hotspots = hotspots.len(),
        targets = targets.len(),
        "Clustering complete"
    );
    targets
}

fn aggregate(id: usize, members: &[&HotSpot]) -> SprayTarget {
    let n = members.len() as f64;
    let mut pixel_sum = Point2::default();
    let mut world_sum = Point3::default();
    let mut severity = 0.0;

    for spot in members {
        pixel_sum.x += spot.pixel_centroid.x;
        pixel_sum.y += spot.pixel_centroid.y;
        world_sum.x += spot.approx_world_position.x;
        world_sum.y += spot.approx_world_position.y;
        world_sum.z += spot.approx_world_position.z;
        severity += spot.severity();
    }

    let approx_world_aim_point = if world_sum.z == 0.0 {
        Point3::default()
    } else {
        Point3::new(world_sum.x / n, world_sum.y / n, world_sum.z / n)
    };

    SprayTarget {
        id,
        aim_pixel_point: Point2::new(pixel_sum.x / n, pixel_sum.y / n),
        approx_world_aim_point,
        member_hotspot_ids: members.iter().map(|s| s.id).collect(),
        severity,
    }
}
