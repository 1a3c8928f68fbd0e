use areaui::Color;

/// Colors shared by the controls of one factory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Background of buttons, sliders and combo boxes at rest.
    pub idle: Color,
    /// Background of a pressed button and the filled part of a slider.
    pub prepared: Color,
    /// Background of an open combo box list.
    pub list: Color,
    pub text: Color,
    pub text_scale: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            idle: Color::rgba(0.31, 0.56, 0.34, 0.8),
            prepared: Color::rgba(0.31, 0.56, 0.34, 0.95),
            list: Color::rgba(0.31, 0.56, 0.34, 0.7),
            text: Color::WHITE,
            text_scale: 1.0,
        }
    }
}
