//! Cluster membership produced by one assignment pass.

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

/// Mapping from cluster id to the points assigned to it.
///
/// Members are stored as row indices into the training data, each list in
/// original point order. Every training point appears in exactly one list;
/// lists may be empty. The struct is rebuilt from scratch on every
/// iteration and is read-only once handed out by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    members: Vec<Vec<usize>>,
    labels: Vec<usize>,
}

impl Assignment {
    /// Build from per-point labels. Every label must be `< k`.
    pub(crate) fn from_labels(labels: Vec<usize>, k: usize) -> Self {
        let mut members = vec![Vec::new(); k];
        for (i, &label) in labels.iter().enumerate() {
            members[label].push(i);
        }
        Self { members, labels }
    }

    /// Number of clusters, including empty ones.
    pub fn n_clusters(&self) -> usize {
        self.members.len()
    }

    /// Cluster id of each training point, indexed like the input.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Row indices of the points in `cluster`, in input order.
    ///
    /// # Panics
    ///
    /// Panics if `cluster >= n_clusters()`.
    pub fn members(&self, cluster: usize) -> &[usize] {
        &self.members[cluster]
    }

    /// Number of points in `cluster`.
    pub fn len_of(&self, cluster: usize) -> usize {
        self.members[cluster].len()
    }

    /// Whether `cluster` received no points.
    pub fn is_empty_cluster(&self, cluster: usize) -> bool {
        self.members[cluster].is_empty()
    }

    /// Size of every cluster, indexed by cluster id.
    pub fn sizes(&self) -> Vec<usize> {
        self.members.iter().map(Vec::len).collect()
    }

    /// Number of clusters with no members.
    pub fn empty_clusters(&self) -> usize {
        self.members.iter().filter(|m| m.is_empty()).count()
    }

    /// `(cluster id, members)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.members.iter().map(Vec::as_slice).enumerate()
    }

    /// Rows of `data` belonging to `cluster`, in input order.
    pub(crate) fn rows_of<'a>(
        &'a self,
        data: ArrayView2<'a, f64>,
        cluster: usize,
    ) -> impl Iterator<Item = ArrayView1<'a, f64>> + 'a {
        self.members[cluster]
            .iter()
            .map(move |&i| data.index_axis_move(Axis(0), i))
    }

    /// Coordinate-wise mean of each non-empty cluster.
    ///
    /// Rows of `previous` are carried over unchanged for empty clusters.
    /// Finite input always yields finite means: when a coordinate sum
    /// overflows, the row is recomputed from pre-divided values.
    pub(crate) fn means(
        &self,
        data: ArrayView2<'_, f64>,
        previous: ArrayView2<'_, f64>,
    ) -> Array2<f64> {
        let mut next = previous.to_owned();
        for (k, members) in self.members.iter().enumerate() {
            if members.is_empty() {
                continue;
            }
            let len = members.len() as f64;
            let mut row = next.row_mut(k);
            row.fill(0.0);
            for &i in members {
                row += &data.row(i);
            }
            if row.iter().all(|x| x.is_finite()) {
                row /= len;
            } else {
                row.fill(0.0);
                for &i in members {
                    row.zip_mut_with(&data.row(i), |m, &x| *m += x / len);
                }
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn members_follow_input_order() {
        let a = Assignment::from_labels(vec![1, 0, 1, 1, 0], 3);
        assert_eq!(a.members(0), &[1, 4]);
        assert_eq!(a.members(1), &[0, 2, 3]);
        assert!(a.is_empty_cluster(2));
        assert_eq!(a.sizes(), vec![2, 3, 0]);
        assert_eq!(a.empty_clusters(), 1);
        assert_eq!(a.labels(), &[1, 0, 1, 1, 0]);
    }

    #[test]
    fn means_keep_empty_rows() {
        let data = array![[0.0, 0.0], [2.0, 4.0], [10.0, 10.0]];
        let previous = array![[9.0, 9.0], [7.0, 7.0], [-3.0, 5.0]];
        let a = Assignment::from_labels(vec![0, 0, 1], 3);

        let next = a.means(data.view(), previous.view());
        assert_eq!(next, array![[1.0, 2.0], [10.0, 10.0], [-3.0, 5.0]]);
    }

    #[test]
    fn means_stay_finite_when_sum_overflows() {
        let data = array![[1e308, 1.0], [1e308, 3.0], [-1e308, 0.0]];
        let previous = array![[0.0, 0.0], [0.0, 0.0]];
        let a = Assignment::from_labels(vec![0, 0, 1], 2);

        let next = a.means(data.view(), previous.view());
        assert!(next.iter().all(|x| x.is_finite()), "{next:?}");
        assert_eq!(next[[0, 0]], 1e308);
        assert_eq!(next[[0, 1]], 2.0);
        assert_eq!(next[[1, 0]], -1e308);
    }

    #[test]
    fn rows_of_yields_member_rows() {
        let data = array![[0.0], [1.0], [2.0]];
        let a = Assignment::from_labels(vec![1, 0, 1], 2);
        let rows: Vec<f64> = a.rows_of(data.view(), 1).map(|r| r[0]).collect();
        assert_eq!(rows, vec![0.0, 2.0]);
    }
}
