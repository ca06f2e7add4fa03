//! Clustering of uncovered samples for gap re-seeding.
//!
//! Groups leftover uncovered sample points into connected clusters using
//! union-find over a spatial hash grid, then reports cluster centroids so the
//! adaptive strategy can seed fresh candidates where coverage gaps remain.

use std::collections::HashMap;

use crate::core::Point2D;

/// A connected cluster of uncovered samples.
#[derive(Clone, Copy, Debug)]
pub struct Cluster {
    /// Mean position of the cluster's points.
    pub centroid: Point2D,
    /// Number of points in the cluster.
    pub size: usize,
}

/// Cluster points by connectivity: two points join the same cluster when
/// they are within `cluster_radius` of each other (directly or transitively).
///
/// Returned clusters are ordered largest first; ties break on first
/// appearance in the input, so output is deterministic for a fixed input
/// order.
pub fn cluster_points(points: &[Point2D], cluster_radius: f32) -> Vec<Cluster> {
    let n = points.len();
    if n == 0 || cluster_radius <= 0.0 {
        return Vec::new();
    }

    let mut uf = UnionFind::new(n);

    // Spatial hash grid so neighbor checks stay near-linear
    let cell_size = cluster_radius;
    let mut spatial_grid: HashMap<(i32, i32), Vec<usize>> = HashMap::with_capacity(n);
    for (i, p) in points.iter().enumerate() {
        let cell = ((p.x / cell_size).floor() as i32, (p.y / cell_size).floor() as i32);
        spatial_grid.entry(cell).or_default().push(i);
    }

    let radius_sq = cluster_radius * cluster_radius;
    for (i, p) in points.iter().enumerate() {
        let cx = (p.x / cell_size).floor() as i32;
        let cy = (p.y / cell_size).floor() as i32;

        // 3x3 cell neighborhood covers every candidate within the radius
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(indices) = spatial_grid.get(&(cx + dx, cy + dy)) {
                    for &j in indices {
                        if i < j && p.distance_squared(points[j]) <= radius_sq {
                            uf.union(i, j);
                        }
                    }
                }
            }
        }
    }

    // Assign cluster slots by first appearance so ordering never depends on
    // hash-map iteration
    let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
    let mut sums: Vec<Point2D> = Vec::new();
    let mut sizes: Vec<usize> = Vec::new();

    for (i, p) in points.iter().enumerate() {
        let root = uf.find(i);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            sums.push(Point2D::ZERO);
            sizes.push(0);
            sums.len() - 1
        });
        sums[slot] = sums[slot] + *p;
        sizes[slot] += 1;
    }

    let mut clusters: Vec<Cluster> = sums
        .iter()
        .zip(&sizes)
        .map(|(&sum, &size)| Cluster {
            centroid: sum * (1.0 / size as f32),
            size,
        })
        .collect();

    // Stable sort keeps first-appearance order among equal sizes
    clusters.sort_by(|a, b| b.size.cmp(&a.size));
    clusters
}

/// Union-find with path compression and union by rank.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x != root_y {
            if self.rank[root_x] < self.rank[root_y] {
                self.parent[root_x] = root_y;
            } else if self.rank[root_x] > self.rank[root_y] {
                self.parent[root_y] = root_x;
            } else {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(cluster_points(&[], 1.0).is_empty());
    }

    #[test]
    fn test_single_cluster() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(0.5, 0.0),
            Point2D::new(1.0, 0.0),
        ];
        let clusters = cluster_points(&points, 0.6);

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].size, 3);
        assert!((clusters[0].centroid.x - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_two_clusters_sorted_by_size() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(10.5, 10.0),
            Point2D::new(10.0, 10.5),
        ];
        let clusters = cluster_points(&points, 1.0);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].size, 3);
        assert_eq!(clusters[1].size, 1);
        assert!((clusters[1].centroid.x - 0.0).abs() < 1e-5);
    }

    #[test]
    fn test_transitive_connectivity() {
        // A chain where only adjacent points are within the radius
        let points: Vec<Point2D> = (0..5).map(|i| Point2D::new(i as f32 * 0.9, 0.0)).collect();
        let clusters = cluster_points(&points, 1.0);

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].size, 5);
    }

    #[test]
    fn test_deterministic_output() {
        let points = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(5.0, 5.0),
            Point2D::new(9.0, 1.0),
        ];
        let a = cluster_points(&points, 1.0);
        let b = cluster_points(&points, 1.0);

        assert_eq!(a.len(), b.len());
        for (ca, cb) in a.iter().zip(&b) {
            assert_eq!(ca.size, cb.size);
            assert_eq!(ca.centroid, cb.centroid);
        }
    }
}
