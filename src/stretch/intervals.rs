//! Analysis/synthesis interframe intervals and per-frame positions.

/// Frame advance in the input (analysis) and output (synthesis) signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intervals {
    /// Stride between successive analysis frames (Sa).
    pub analysis: usize,
    /// Stride between successive nominal synthesis positions (Ss).
    pub synthesis: usize,
}

impl Intervals {
    /// Derives Sa and Ss from the time-scale factor and frame size.
    ///
    /// Stretching (`alpha > 1`) shortens Sa to `N / (2 * alpha)` so that Ss
    /// stays close to half a frame; otherwise Sa is half a frame. In both
    /// cases `Ss = floor(Sa * alpha)`.
    pub fn new(alpha: f64, frame_size: usize) -> Self {
        let analysis = if alpha > 1.0 {
            (frame_size as f64 / (2.0 * alpha)) as usize
        } else {
            frame_size / 2
        };
        let synthesis = (analysis as f64 * alpha) as usize;
        Self {
            analysis,
            synthesis,
        }
    }
}

/// Positions and limits of one frame of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    /// Frame index m.
    pub index: usize,
    /// Frame size N.
    pub frame_size: usize,
    /// Interframe intervals of the run.
    pub intervals: Intervals,
}

impl FrameGeometry {
    pub fn new(index: usize, frame_size: usize, intervals: Intervals) -> Self {
        Self {
            index,
            frame_size,
            intervals,
        }
    }

    /// Start of the analysis frame in the input (m * Sa).
    #[inline]
    pub fn analysis_start(&self) -> usize {
        self.index * self.intervals.analysis
    }

    /// Nominal synthesis position in the output (m * Ss).
    #[inline]
    pub fn nominal_start(&self) -> usize {
        self.index * self.intervals.synthesis
    }

    /// Largest lag the search considers (N / 2).
    #[inline]
    pub fn max_lag(&self) -> usize {
        self.frame_size / 2
    }

    /// Shortest overlap a lag may be chosen with (N / 8, at least one sample).
    #[inline]
    pub fn min_overlap(&self) -> usize {
        (self.frame_size / 8).max(1)
    }

    /// Overlap between a frame placed at `position` and the valid output.
    ///
    /// This is N unless the frame runs past `valid_len`, in which case only
    /// the part before `valid_len` overlaps.
    #[inline]
    pub fn overlap_at(&self, position: usize, valid_len: usize) -> usize {
        if position + self.frame_size > valid_len {
            valid_len.saturating_sub(position)
        } else {
            self.frame_size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intervals_identity() {
        let iv = Intervals::new(1.0, 160);
        assert_eq!(iv.analysis, 80);
        assert_eq!(iv.synthesis, 80);
    }

    #[test]
    fn test_intervals_stretch() {
        // 160 / 3 = 53.33 -> 53; 53 * 1.5 = 79.5 -> 79
        let iv = Intervals::new(1.5, 160);
        assert_eq!(iv.analysis, 53);
        assert_eq!(iv.synthesis, 79);

        let iv = Intervals::new(2.0, 160);
        assert_eq!(iv.analysis, 40);
        assert_eq!(iv.synthesis, 80);
    }

    #[test]
    fn test_intervals_compress() {
        let iv = Intervals::new(0.5, 160);
        assert_eq!(iv.analysis, 80);
        assert_eq!(iv.synthesis, 40);

        let iv = Intervals::new(0.75, 25);
        assert_eq!(iv.analysis, 12);
        assert_eq!(iv.synthesis, 9);
    }

    #[test]
    fn test_geometry_positions() {
        let g = FrameGeometry::new(3, 160, Intervals::new(1.5, 160));
        assert_eq!(g.analysis_start(), 159);
        assert_eq!(g.nominal_start(), 237);
        assert_eq!(g.max_lag(), 80);
        assert_eq!(g.min_overlap(), 20);
    }

    #[test]
    fn test_min_overlap_never_zero() {
        let g = FrameGeometry::new(1, 4, Intervals::new(1.0, 4));
        assert_eq!(g.min_overlap(), 1);
    }

    #[test]
    fn test_overlap_truncation() {
        let g = FrameGeometry::new(1, 160, Intervals::new(1.0, 160));
        assert_eq!(g.overlap_at(0, 160), 160);
        assert_eq!(g.overlap_at(80, 160), 80);
        assert_eq!(g.overlap_at(80, 400), 160);
        assert_eq!(g.overlap_at(200, 160), 0);
    }
}
