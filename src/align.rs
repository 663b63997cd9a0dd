//! Alignment keyword resolution for the `preserveAspectRatio` attribute.

// ============================================================================
// Alignment
// ============================================================================

/// Horizontal alignment of the viewBox within the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical alignment of the viewBox within the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Resolved alignment directive.
///
/// `slice` crops the viewBox to fill the viewport (`crop` keyword); the
/// default fits it entirely (`meet`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Alignment {
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
    pub slice: bool,
}

impl Alignment {
    /// Parses a space/comma-separated keyword list.
    ///
    /// `left`/`center`/`right` set the horizontal axis, `top`/`middle`/
    /// `bottom` the vertical one, `crop`/`meet` the slice flag. The last
    /// keyword for an axis wins; unrecognized keywords are ignored. An empty
    /// spec yields the default `xMidYMid meet`.
    pub fn parse(spec: &str) -> Self {
        let mut align = Self::default();
        for keyword in spec
            .to_lowercase()
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            match keyword {
                "left" => align.horizontal = HorizontalAlign::Left,
                "center" => align.horizontal = HorizontalAlign::Center,
                "right" => align.horizontal = HorizontalAlign::Right,
                "top" => align.vertical = VerticalAlign::Top,
                "middle" => align.vertical = VerticalAlign::Middle,
                "bottom" => align.vertical = VerticalAlign::Bottom,
                "crop" => align.slice = true,
                "meet" => align.slice = false,
                _ => {}
            }
        }
        align
    }

    /// The `preserveAspectRatio` attribute value.
    pub fn directive(&self) -> String {
        let horizontal = match self.horizontal {
            HorizontalAlign::Left => "xMin",
            HorizontalAlign::Center => "xMid",
            HorizontalAlign::Right => "xMax",
        };
        let vertical = match self.vertical {
            VerticalAlign::Top => "YMin",
            VerticalAlign::Middle => "YMid",
            VerticalAlign::Bottom => "YMax",
        };
        let fit = if self.slice { "slice" } else { "meet" };
        format!("{horizontal}{vertical} {fit}")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directive() {
        assert_eq!(Alignment::parse("").directive(), "xMidYMid meet");
        assert_eq!(Alignment::default().directive(), "xMidYMid meet");
    }

    #[test]
    fn corner_crop() {
        assert_eq!(Alignment::parse("left top crop").directive(), "xMinYMin slice");
        assert_eq!(
            Alignment::parse("right,bottom").directive(),
            "xMaxYMax meet"
        );
    }

    #[test]
    fn last_keyword_wins_per_axis() {
        assert_eq!(
            Alignment::parse("left right top").directive(),
            "xMaxYMin meet"
        );
        assert_eq!(
            Alignment::parse("crop meet crop").directive(),
            "xMidYMid slice"
        );
    }

    #[test]
    fn unknown_keywords_are_ignored() {
        assert_eq!(
            Alignment::parse("sideways LEFT nowhere").directive(),
            "xMinYMid meet"
        );
    }
}
