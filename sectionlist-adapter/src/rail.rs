/// Where the rail was laid out, in the same coordinate space as pointer samples.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RailLayout {
    pub origin_y: f32,
    pub height: f32,
}

impl RailLayout {
    pub fn new(origin_y: f32, height: f32) -> Self {
        Self { origin_y, height }
    }
}

/// Maps a pointer's absolute `y` to the section under it.
///
/// The rail is split into `section_count` equal bands; samples above or below the rail clamp
/// to the first or last section. Returns `None` when there are no sections.
///
/// A degenerate band height (zero, negative, non-finite) is treated as `1.0`.
pub fn resolve_section(pointer_y: f32, layout: RailLayout, section_count: usize) -> Option<usize> {
    let last = section_count.checked_sub(1)?;
    let relative = pointer_y - layout.origin_y;
    let band = layout.height / section_count as f32;
    let band = if band.is_finite() && band > 0.0 { band } else { 1.0 };
    let slot = relative / band;
    // Truncation is floor for the non-negative slots that reach the last arm.
    Some(if slot.is_nan() || slot < 1.0 {
        0
    } else if slot >= last as f32 {
        last
    } else {
        slot as usize
    })
}

/// Whether every pointer sample dispatches, or only samples that land on a new section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleDedup {
    #[default]
    EverySample,
    OnChange,
}

/// Input to [`AlphaRail`], as delivered by a gesture recognizer and the layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RailEvent {
    /// The rail was (re)measured.
    Layout(RailLayout),
    PointerDown { y: f32 },
    PointerMove { y: f32 },
    PointerUp,
    /// The gesture was taken away (e.g. the rail unmounted).
    Cancel,
    /// A label was tapped; resolves straight to its index.
    LabelPress(usize),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum RailPhase {
    /// Not laid out yet; pointer samples are ignored.
    #[default]
    Idle,
    Measured(RailLayout),
    Tracking {
        layout: RailLayout,
        last: Option<usize>,
    },
}

/// The alpha index rail's gesture state machine.
///
/// ```text
/// Idle ──Layout──▶ Measured ──PointerDown/Move──▶ Tracking ──PointerUp/Cancel──▶ Measured
/// ```
///
/// Each handled event yields at most one section index to scroll to. The rail never scrolls
/// anything itself; the caller turns the index into a scroll request.
#[derive(Clone, Debug, Default)]
pub struct AlphaRail {
    phase: RailPhase,
    section_count: usize,
    dedup: SampleDedup,
}

impl AlphaRail {
    pub fn new(section_count: usize) -> Self {
        Self {
            section_count,
            ..Self::default()
        }
    }

    pub fn with_dedup(mut self, dedup: SampleDedup) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn set_dedup(&mut self, dedup: SampleDedup) {
        self.dedup = dedup;
    }

    pub fn phase(&self) -> RailPhase {
        self.phase
    }

    pub fn layout(&self) -> Option<RailLayout> {
        match self.phase {
            RailPhase::Idle => None,
            RailPhase::Measured(layout) | RailPhase::Tracking { layout, .. } => Some(layout),
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.phase, RailPhase::Tracking { .. })
    }

    pub fn section_count(&self) -> usize {
        self.section_count
    }

    /// Updates the number of labels. An in-flight gesture keeps tracking against the new count.
    pub fn set_section_count(&mut self, section_count: usize) {
        self.section_count = section_count;
        if let RailPhase::Tracking { last, .. } = &mut self.phase {
            *last = None;
        }
    }

    /// Feeds one event and returns the section to scroll to, if any.
    pub fn handle(&mut self, event: RailEvent) -> Option<usize> {
        match event {
            RailEvent::Layout(layout) => {
                self.phase = match self.phase {
                    RailPhase::Idle | RailPhase::Measured(_) => RailPhase::Measured(layout),
                    RailPhase::Tracking { last, .. } => RailPhase::Tracking { layout, last },
                };
                None
            }
            RailEvent::PointerDown { y } => {
                let layout = self.layout()?;
                self.phase = RailPhase::Tracking { layout, last: None };
                self.sample(y)
            }
            RailEvent::PointerMove { y } => {
                let layout = self.layout()?;
                if let RailPhase::Measured(_) = self.phase {
                    self.phase = RailPhase::Tracking { layout, last: None };
                }
                self.sample(y)
            }
            RailEvent::PointerUp | RailEvent::Cancel => {
                if let RailPhase::Tracking { layout, .. } = self.phase {
                    self.phase = RailPhase::Measured(layout);
                }
                None
            }
            RailEvent::LabelPress(index) => {
                if index >= self.section_count {
                    vwarn!(
                        index,
                        count = self.section_count,
                        "AlphaRail: label press out of range"
                    );
                    return None;
                }
                Some(index)
            }
        }
    }

    fn sample(&mut self, y: f32) -> Option<usize> {
        let RailPhase::Tracking { layout, last } = &mut self.phase else {
            return None;
        };
        let index = resolve_section(y, *layout, self.section_count)?;
        if self.dedup == SampleDedup::OnChange && *last == Some(index) {
            return None;
        }
        *last = Some(index);
        vtrace!(y, index, "AlphaRail: sample");
        Some(index)
    }
}
