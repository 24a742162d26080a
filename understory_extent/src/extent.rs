// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Extent`] profile type and its union and separation algorithms.

use alloc::vec::Vec;
use core::cell::Cell;

use crate::error::{ExtentError, Result};

/// One run of an [`Extent`]: `length` units along the profile, bounded at `size`.
///
/// A NaN `size` means the run is unbounded (nothing is there).
#[derive(Copy, Clone, Debug)]
pub struct Run {
    /// Length of the run along the profile. Always finite and positive.
    pub length: f64,
    /// Distance from the owner's axis to the silhouette edge, or NaN.
    pub size: f64,
}

impl PartialEq for Run {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && same_size(self.size, other.size)
    }
}

/// Summary of an [`Extent`]: total length and the smallest and largest bounded sizes.
///
/// `min_size` and `max_size` are NaN when no run is bounded.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingValues {
    /// Sum of all run lengths.
    pub total_length: f64,
    /// Smallest bounded size.
    pub min_size: f64,
    /// Largest bounded size.
    pub max_size: f64,
}

/// Run-length encoded 1D silhouette of a subtree as seen from one direction.
///
/// Positions along the profile start at `0` at the first run. The
/// [offset](Extent::offset) is where the owning node's center projects onto
/// that sequence; it is never negative.
#[derive(Clone, Debug, Default)]
pub struct Extent {
    runs: Vec<Run>,
    offset: f64,
    bounding: Cell<Option<BoundingValues>>,
}

impl PartialEq for Extent {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && self.runs == other.runs
    }
}

impl Extent {
    /// Create an empty extent with a zero offset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extent made of a single run.
    pub fn from_run(length: f64, size: f64, offset: f64) -> Result<Self> {
        let mut extent = Self::new();
        extent.append_ls(length, size)?;
        extent.set_offset(offset)?;
        Ok(extent)
    }

    /// The runs of this extent, first to last.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Number of runs.
    pub fn num_runs(&self) -> usize {
        self.runs.len()
    }

    /// True if the extent has no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Where the owning node's center projects onto the runs.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Set the center offset.
    pub fn set_offset(&mut self, offset: f64) -> Result<()> {
        if offset.is_nan() || offset < 0.0 || offset.is_infinite() {
            return Err(ExtentError::NegativeOffset(offset));
        }
        self.offset = offset;
        Ok(())
    }

    /// Remove all runs and reset the offset.
    pub fn clear(&mut self) {
        self.runs.clear();
        self.offset = 0.0;
        self.invalidate();
    }

    /// Append a run at the end, merging with the last run when the sizes match.
    ///
    /// Zero lengths are ignored.
    pub fn append_ls(&mut self, length: f64, size: f64) -> Result<()> {
        check_length(length)?;
        if length == 0.0 {
            return Ok(());
        }
        match self.runs.last_mut() {
            Some(last) if same_size(last.size, size) => last.length += length,
            _ => self.runs.push(Run { length, size }),
        }
        self.invalidate();
        Ok(())
    }

    /// Prepend a run at the start, merging with the first run when the sizes match.
    ///
    /// The offset is not moved; callers that keep a center fixed must shift it.
    pub fn prepend_ls(&mut self, length: f64, size: f64) -> Result<()> {
        check_length(length)?;
        if length == 0.0 {
            return Ok(());
        }
        match self.runs.first_mut() {
            Some(first) if same_size(first.size, size) => first.length += length,
            _ => self.runs.insert(0, Run { length, size }),
        }
        self.invalidate();
        Ok(())
    }

    /// Size of the run covering `position`, or NaN outside the profile.
    pub fn size_at(&self, position: f64) -> f64 {
        if position < 0.0 {
            return f64::NAN;
        }
        let mut start = 0.0;
        for run in &self.runs {
            let end = start + run.length;
            if position < end {
                return run.size;
            }
            start = end;
        }
        // The far edge belongs to the last run.
        match self.runs.last() {
            Some(last) if position == start => last.size,
            _ => f64::NAN,
        }
    }

    /// Add `adjustment` to every bounded size.
    pub fn adjust_size(&mut self, adjustment: f64) {
        for run in &mut self.runs {
            run.size += adjustment;
        }
        self.invalidate();
    }

    /// Multiply lengths, sizes and the offset by `factor`.
    pub fn scale(&mut self, factor: f64) -> Result<()> {
        check_scale(factor)?;
        for run in &mut self.runs {
            run.length *= factor;
            run.size *= factor;
        }
        self.offset *= factor;
        self.invalidate();
        Ok(())
    }

    /// Collapse to a single run spanning the whole length at the largest size.
    pub fn simplify(&mut self) {
        let bv = self.bounding_values();
        self.runs.clear();
        if bv.total_length > 0.0 {
            self.runs.push(Run {
                length: bv.total_length,
                size: bv.max_size,
            });
        }
        self.invalidate();
    }

    /// Total length plus minimum and maximum bounded size. Cached until the next mutation.
    pub fn bounding_values(&self) -> BoundingValues {
        if let Some(bv) = self.bounding.get() {
            return bv;
        }
        let mut bv = BoundingValues {
            total_length: 0.0,
            min_size: f64::NAN,
            max_size: f64::NAN,
        };
        for run in &self.runs {
            bv.total_length += run.length;
            if !run.size.is_nan() {
                bv.min_size = nan_min(bv.min_size, run.size);
                bv.max_size = nan_max(bv.max_size, run.size);
            }
        }
        self.bounding.set(Some(bv));
        bv
    }

    /// Union of this profile and `given`.
    ///
    /// `given` starts `length_adjustment` units after this profile's start, and its
    /// lengths and sizes are multiplied by `scale` before `size_adjustment` is added
    /// to its sizes. The result keeps this profile's center: its offset grows when
    /// `given` starts before this profile does.
    pub fn combined_extent(
        &self,
        given: &Self,
        length_adjustment: f64,
        size_adjustment: f64,
        scale: f64,
    ) -> Result<Self> {
        check_scale(scale)?;
        if !length_adjustment.is_finite() {
            return Err(ExtentError::InvalidLength(length_adjustment));
        }
        if length_adjustment < 0.0 {
            // Swap roles: express this profile in the given profile's units.
            let mut result = given.combined_extent(
                self,
                -length_adjustment / scale,
                -size_adjustment / scale,
                1.0 / scale,
            )?;
            result.scale(scale)?;
            result.adjust_size(size_adjustment);
            result.set_offset(self.offset - length_adjustment)?;
            return Ok(result);
        }
        if length_adjustment > 0.0 {
            let mut shifted = given.clone();
            shifted.prepend_ls(length_adjustment / scale, f64::NAN)?;
            return self.combined_extent(&shifted, 0.0, size_adjustment, scale);
        }

        let mut result = Self::new();
        result.offset = self.offset;
        let this_count = self.runs.len();
        let given_count = given.runs.len();
        let (mut this_run, mut given_run) = (0, 0);
        let (mut this_start, mut given_start) = (0.0, 0.0);
        let mut cursor = 0.0;
        while this_run < this_count || given_run < given_count {
            let (this_end, this_size) = match self.runs.get(this_run) {
                Some(run) => (this_start + run.length, run.size),
                None => (f64::INFINITY, f64::NAN),
            };
            let (given_end, given_size) = match given.runs.get(given_run) {
                Some(run) => (
                    given_start + scale * run.length,
                    scale * run.size + size_adjustment,
                ),
                None => (f64::INFINITY, f64::NAN),
            };
            let end = this_end.min(given_end);
            if end > cursor {
                result.append_ls(end - cursor, nan_max(this_size, given_size))?;
                cursor = end;
            }
            if this_end <= end {
                this_start = this_end;
                this_run += 1;
            }
            if given_end <= end {
                given_start = given_end;
                given_run += 1;
            }
        }
        Ok(result)
    }

    /// Replace this profile with its union with `given`, keeping full resolution.
    pub fn combine_extent(
        &mut self,
        given: &Self,
        length_adjustment: f64,
        size_adjustment: f64,
        scale: f64,
    ) -> Result<()> {
        *self = self.combined_extent(given, length_adjustment, size_adjustment, scale)?;
        Ok(())
    }

    /// Replace this profile with a single run covering its union with `given`.
    ///
    /// This is the lossy counterpart of [`combine_extent`](Self::combine_extent):
    /// the result spans both profiles at the larger of their maximum sizes.
    pub fn combine_extent_and_simplify(
        &mut self,
        given: &Self,
        length_adjustment: f64,
        size_adjustment: f64,
        scale: f64,
    ) -> Result<()> {
        check_scale(scale)?;
        if !length_adjustment.is_finite() {
            return Err(ExtentError::InvalidLength(length_adjustment));
        }
        let this_bv = self.bounding_values();
        let given_bv = given.bounding_values();
        let (start, end, size) = if given_bv.total_length > 0.0 {
            (
                length_adjustment.min(0.0),
                this_bv
                    .total_length
                    .max(length_adjustment + scale * given_bv.total_length),
                nan_max(
                    this_bv.max_size,
                    scale * given_bv.max_size + size_adjustment,
                ),
            )
        } else {
            (0.0, this_bv.total_length, this_bv.max_size)
        };
        let offset = self.offset - start;
        self.runs.clear();
        self.invalidate();
        if end > start {
            self.append_ls(end - start, size)?;
        }
        self.set_offset(offset)
    }

    /// Merge a single literal bound of `size` covering `[start, start + length)`.
    pub fn combine_bound(&mut self, start: f64, length: f64, size: f64) -> Result<()> {
        check_length(length)?;
        if length == 0.0 {
            return Ok(());
        }
        let mut bound = Self::new();
        bound.append_ls(length, size)?;
        self.combine_extent(&bound, start, 0.0, 1.0)
    }

    /// Smallest center-to-center distance that keeps `given` from overlapping this profile.
    ///
    /// Both profiles face each other. `given` starts `position_adjustment` units after
    /// this profile's start and is multiplied by `scale`. Where both profiles are
    /// bounded, the distance must cover both sizes. When `allow_axis_overlap` is
    /// false, a bounded run facing nothing must still keep `axis_minimum` clear of
    /// the opposite axis.
    pub fn separation(
        &self,
        given: &Self,
        position_adjustment: f64,
        allow_axis_overlap: bool,
        scale: f64,
        axis_minimum: f64,
    ) -> f64 {
        let mut separation = 0.0_f64;
        let lone = |size: f64, separation: &mut f64| {
            if !allow_axis_overlap && !size.is_nan() {
                *separation = separation.max(size + axis_minimum);
            }
        };

        let this_count = self.runs.len();
        let given_count = given.runs.len();
        let (mut this_run, mut given_run) = (0, 0);
        let mut this_start = 0.0;
        let mut given_start = position_adjustment;
        while this_run < this_count && given_run < given_count {
            let this = self.runs[this_run];
            let given_length = scale * given.runs[given_run].length;
            let given_size = scale * given.runs[given_run].size;
            let this_end = this_start + this.length;
            let given_end = given_start + given_length;
            if this_end <= given_start {
                lone(this.size, &mut separation);
                this_start = this_end;
                this_run += 1;
                continue;
            }
            if given_end <= this_start {
                lone(given_size, &mut separation);
                given_start = given_end;
                given_run += 1;
                continue;
            }
            match (this.size.is_nan(), given_size.is_nan()) {
                (false, false) => separation = separation.max(this.size + given_size),
                (false, true) => lone(this.size, &mut separation),
                (true, false) => lone(given_size, &mut separation),
                (true, true) => {}
            }
            if this_end <= given_end {
                this_start = this_end;
                this_run += 1;
            }
            if given_end <= this_end {
                given_start = given_end;
                given_run += 1;
            }
        }
        for run in &self.runs[this_run..] {
            lone(run.size, &mut separation);
        }
        for run in &given.runs[given_run..] {
            lone(scale * run.size, &mut separation);
        }
        separation
    }

    fn invalidate(&mut self) {
        self.bounding.set(None);
    }
}

fn check_length(length: f64) -> Result<()> {
    if length.is_nan() || length < 0.0 || length.is_infinite() {
        return Err(ExtentError::InvalidLength(length));
    }
    Ok(())
}

fn check_scale(scale: f64) -> Result<()> {
    if scale.is_nan() || scale <= 0.0 || scale.is_infinite() {
        return Err(ExtentError::InvalidScale(scale));
    }
    Ok(())
}

fn same_size(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

/// Larger of two sizes, treating NaN as absent.
pub(crate) fn nan_max(a: f64, b: f64) -> f64 {
    match (a.is_nan(), b.is_nan()) {
        (true, _) => b,
        (_, true) => a,
        _ => a.max(b),
    }
}

fn nan_min(a: f64, b: f64) -> f64 {
    match (a.is_nan(), b.is_nan()) {
        (true, _) => b,
        (_, true) => a,
        _ => a.min(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn extent(runs: &[(f64, f64)]) -> Extent {
        let mut e = Extent::new();
        for &(length, size) in runs {
            e.append_ls(length, size).unwrap();
        }
        e
    }

    fn pairs(e: &Extent) -> Vec<(f64, f64)> {
        e.runs().iter().map(|r| (r.length, r.size)).collect()
    }

    #[test]
    fn append_coalesces_matching_sizes() {
        let mut e = Extent::new();
        e.append_ls(10.0, 5.0).unwrap();
        e.append_ls(4.0, 5.0).unwrap();
        e.append_ls(3.0, f64::NAN).unwrap();
        e.append_ls(2.0, f64::NAN).unwrap();
        assert_eq!(e.num_runs(), 2);
        assert_eq!(e.runs()[0].length, 14.0);
        assert_eq!(e.runs()[1].length, 5.0);
        assert!(e.runs()[1].size.is_nan());
    }

    #[test]
    fn prepend_coalesces_and_keeps_order() {
        let mut e = extent(&[(10.0, 5.0)]);
        e.prepend_ls(2.0, 3.0).unwrap();
        e.prepend_ls(1.0, 3.0).unwrap();
        assert_eq!(pairs(&e), vec![(3.0, 3.0), (10.0, 5.0)]);
    }

    #[test]
    fn rejects_bad_lengths() {
        let mut e = Extent::new();
        assert_eq!(e.append_ls(-1.0, 2.0), Err(ExtentError::InvalidLength(-1.0)));
        assert!(e.prepend_ls(f64::NAN, 2.0).is_err());
        assert!(e.append_ls(f64::INFINITY, 2.0).is_err());
        e.append_ls(0.0, 2.0).unwrap();
        assert!(e.is_empty(), "zero length is ignored");
    }

    #[test]
    fn bounding_values_track_mutation() {
        let mut e = extent(&[(10.0, 5.0), (5.0, f64::NAN), (5.0, 2.0)]);
        let bv = e.bounding_values();
        assert_eq!(bv.total_length, 20.0);
        assert_eq!(bv.min_size, 2.0);
        assert_eq!(bv.max_size, 5.0);
        e.append_ls(1.0, 9.0).unwrap();
        assert_eq!(e.bounding_values().max_size, 9.0);
        e.clear();
        let empty = e.bounding_values();
        assert_eq!(empty.total_length, 0.0);
        assert!(empty.max_size.is_nan());
    }

    #[test]
    fn size_at_walks_runs() {
        let e = extent(&[(10.0, 5.0), (10.0, 7.0)]);
        assert_eq!(e.size_at(0.0), 5.0);
        assert_eq!(e.size_at(9.5), 5.0);
        assert_eq!(e.size_at(10.0), 7.0);
        assert_eq!(e.size_at(20.0), 7.0);
        assert!(e.size_at(20.5).is_nan());
        assert!(e.size_at(-0.5).is_nan());
    }

    #[test]
    fn combine_overlapping_takes_max() {
        let a = extent(&[(10.0, 5.0)]);
        let b = extent(&[(4.0, 2.0), (4.0, 8.0)]);
        let c = a.combined_extent(&b, 3.0, 0.0, 1.0).unwrap();
        assert_eq!(pairs(&c), vec![(7.0, 5.0), (4.0, 8.0)]);
        assert_eq!(c.offset(), 0.0);
    }

    #[test]
    fn combine_disjoint_leaves_nan_gap() {
        let a = extent(&[(10.0, 5.0)]);
        let b = extent(&[(5.0, 3.0)]);
        let c = a.combined_extent(&b, 15.0, 0.0, 1.0).unwrap();
        let p = pairs(&c);
        assert_eq!(p.len(), 3);
        assert_eq!(p[0], (10.0, 5.0));
        assert_eq!(p[1].0, 5.0);
        assert!(p[1].1.is_nan());
        assert_eq!(p[2], (5.0, 3.0));
    }

    #[test]
    fn combine_negative_adjustment_shifts_offset() {
        let mut a = extent(&[(10.0, 5.0)]);
        a.set_offset(5.0).unwrap();
        let b = extent(&[(4.0, 2.0)]);
        let c = a.combined_extent(&b, -4.0, 10.0, 1.0).unwrap();
        assert_eq!(pairs(&c), vec![(4.0, 12.0), (10.0, 5.0)]);
        assert_eq!(c.offset(), 9.0);
    }

    #[test]
    fn combine_applies_scale_and_size_adjustment() {
        let a = extent(&[(10.0, 1.0)]);
        let b = extent(&[(10.0, 2.0)]);
        let c = a.combined_extent(&b, 0.0, 3.0, 0.5).unwrap();
        // given covers 5 units at 0.5 * 2 + 3 = 4.
        assert_eq!(pairs(&c), vec![(5.0, 4.0), (5.0, 1.0)]);
    }

    #[test]
    fn negative_adjustment_with_scale_matches_direct_union() {
        let mut a = extent(&[(8.0, 2.0), (8.0, 6.0)]);
        a.set_offset(8.0).unwrap();
        let b = extent(&[(4.0, 4.0)]);
        let c = a.combined_extent(&b, -2.0, 1.0, 2.0).unwrap();
        // given covers [-2, 6) at 2 * 4 + 1 = 9.
        assert_eq!(pairs(&c), vec![(8.0, 9.0), (2.0, 2.0), (8.0, 6.0)]);
        assert_eq!(c.offset(), 10.0);
    }

    #[test]
    fn loose_combine_collapses_to_single_run() {
        let mut a = extent(&[(10.0, 5.0), (10.0, 1.0)]);
        a.set_offset(10.0).unwrap();
        let b = extent(&[(6.0, 8.0)]);
        a.combine_extent_and_simplify(&b, -3.0, 0.0, 1.0).unwrap();
        assert_eq!(pairs(&a), vec![(23.0, 8.0)]);
        assert_eq!(a.offset(), 13.0);
    }

    #[test]
    fn loose_self_combine_is_idempotent() {
        let mut a = extent(&[(10.0, 5.0), (3.0, f64::NAN), (4.0, 2.0)]);
        let copy = a.clone();
        a.combine_extent_and_simplify(&copy, 0.0, 0.0, 1.0).unwrap();
        let first = a.bounding_values();
        let again = a.clone();
        a.combine_extent_and_simplify(&again, 0.0, 0.0, 1.0).unwrap();
        assert_eq!(a.bounding_values(), first);
        assert_eq!(first.total_length, 17.0);
        assert_eq!(first.max_size, 5.0);
    }

    #[test]
    fn combine_bound_merges_literal_run() {
        let mut a = extent(&[(10.0, 5.0)]);
        a.combine_bound(10.0, 6.0, 0.5).unwrap();
        assert_eq!(pairs(&a), vec![(10.0, 5.0), (6.0, 0.5)]);
        a.combine_bound(2.0, 2.0, 9.0).unwrap();
        assert_eq!(pairs(&a), vec![(2.0, 5.0), (2.0, 9.0), (6.0, 5.0), (6.0, 0.5)]);
    }

    #[test]
    fn separation_of_facing_blocks() {
        let a = extent(&[(10.0, 5.0)]);
        let b = extent(&[(10.0, 3.0)]);
        assert_eq!(a.separation(&b, 0.0, true, 1.0, 0.0), 8.0);
        assert_eq!(a.separation(&b, 0.0, true, 2.0, 0.0), 11.0);
    }

    #[test]
    fn separation_ignores_non_facing_runs_when_overlap_allowed() {
        let a = extent(&[(10.0, 5.0), (10.0, 20.0)]);
        let b = extent(&[(5.0, 3.0)]);
        assert_eq!(a.separation(&b, 2.0, true, 1.0, 0.0), 8.0);
        assert_eq!(a.separation(&b, 12.0, true, 1.0, 0.0), 23.0);
        // Spanning both runs picks the larger.
        assert_eq!(a.separation(&b, 8.0, true, 1.0, 0.0), 23.0);
        // Entirely outside: nothing to separate from.
        assert_eq!(a.separation(&b, 30.0, true, 1.0, 0.0), 0.0);
        assert_eq!(a.separation(&b, -10.0, true, 1.0, 0.0), 0.0);
    }

    #[test]
    fn separation_prevented_overlap_clears_the_axis() {
        let a = extent(&[(10.0, 5.0)]);
        let b = extent(&[(30.0, 3.0)]);
        // b extends far past a; those runs must stay clear of a's axis.
        assert_eq!(a.separation(&b, -10.0, false, 1.0, 2.0), 8.0);
        let tall = extent(&[(30.0, 9.0)]);
        assert_eq!(a.separation(&tall, -10.0, false, 1.0, 2.0), 14.0);
        assert_eq!(a.separation(&tall, -10.0, true, 1.0, 2.0), 14.0);
        let far = extent(&[(5.0, 9.0)]);
        assert_eq!(a.separation(&far, 20.0, false, 1.0, 2.0), 11.0);
        assert_eq!(a.separation(&far, 20.0, true, 1.0, 2.0), 0.0);
    }

    #[test]
    fn scale_and_simplify() {
        let mut e = extent(&[(10.0, 5.0), (10.0, 1.0)]);
        e.set_offset(4.0).unwrap();
        e.scale(0.5).unwrap();
        assert_eq!(pairs(&e), vec![(5.0, 2.5), (5.0, 0.5)]);
        assert_eq!(e.offset(), 2.0);
        e.simplify();
        assert_eq!(pairs(&e), vec![(10.0, 2.5)]);
        assert!(e.scale(0.0).is_err());
    }

    #[test]
    fn negative_offset_is_rejected() {
        let mut e = Extent::new();
        assert_eq!(e.set_offset(-1.0), Err(ExtentError::NegativeOffset(-1.0)));
        assert_eq!(e.offset(), 0.0);
    }

    #[test]
    fn equality_treats_nan_sizes_as_equal() {
        let a = extent(&[(10.0, f64::NAN), (2.0, 1.0)]);
        let b = extent(&[(10.0, f64::NAN), (2.0, 1.0)]);
        assert_eq!(a, b);
        let _ = a.bounding_values();
        assert_eq!(a, b, "cache state does not affect equality");
    }
}
