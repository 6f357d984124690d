//! Markdown code fence tracking

/// Markers that open or close a code block, checked in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FenceKind {
    Backticks,
    Tildes,
    Indent,
    Tab,
}

impl FenceKind {
    const ALL: [FenceKind; 4] = [Self::Backticks, Self::Tildes, Self::Indent, Self::Tab];

    fn marker(self) -> &'static str {
        match self {
            Self::Backticks => "```",
            Self::Tildes => "~~~",
            Self::Indent => "    ",
            Self::Tab => "\t",
        }
    }
}

/// Whether the current body line is inside a code block.
///
/// A fence is closed only by a line starting with the same marker that opened it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum FenceState {
    #[default]
    Outside,
    Inside(FenceKind),
}

impl FenceState {
    pub(crate) fn update(&mut self, line: &str) {
        *self = match *self {
            Self::Outside => FenceKind::ALL
                .into_iter()
                .find(|kind| line.starts_with(kind.marker()))
                .map_or(Self::Outside, Self::Inside),
            Self::Inside(kind) if line.starts_with(kind.marker()) => Self::Outside,
            inside => inside,
        };
    }

    pub(crate) fn in_code_block(&self) -> bool {
        matches!(self, Self::Inside(_))
    }
}
