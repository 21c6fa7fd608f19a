use crate::color::HexColor;
use crate::geometry::Point;
use crate::material::MaterialName;
use crate::wheel::{WheelCell, WheelLayout};

/// Local state of the picker step: the selected color, the raw hex field and the material.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPicker {
    layout: WheelLayout,
    current_color: HexColor,
    hex_text: String,
    material: Option<MaterialName>,
}

impl ColorPicker {
    pub fn new(layout: WheelLayout) -> Self {
        let initial = HexColor::new(0xFF, 0x00, 0x00);
        Self {
            layout,
            current_color: initial,
            hex_text: initial.to_string(),
            material: None,
        }
    }

    pub fn layout(&self) -> &WheelLayout {
        &self.layout
    }

    pub fn current_color(&self) -> HexColor {
        self.current_color
    }

    pub fn hex_text(&self) -> &str {
        &self.hex_text
    }

    pub fn material(&self) -> Option<&MaterialName> {
        self.material.as_ref()
    }

    /// Returns true when the tap landed on the wheel and changed the selection.
    pub fn on_tap(&mut self, point: Point) -> bool {
        let Some((_, color)) = self.layout.resolve(point) else {
            return false;
        };
        self.current_color = color;
        self.hex_text = color.to_string();
        true
    }

    /// The text is always kept; the color only follows it once it is a complete `#RRGGBB`.
    pub fn on_hex_text_change(&mut self, text: impl Into<String>) -> bool {
        self.hex_text = text.into();
        match HexColor::parse(&self.hex_text) {
            Ok(color) => {
                self.current_color = color;
                true
            }
            Err(_) => false,
        }
    }

    pub fn select_material(&mut self, name: MaterialName) {
        self.material = Some(name);
    }

    /// Name forwarded to the result step.
    pub fn material_or_default(&self) -> MaterialName {
        self.material
            .clone()
            .unwrap_or_else(MaterialName::not_selected)
    }

    /// The wedge to outline, if the current color is one of the wheel's own.
    pub fn highlighted_cell(&self) -> Option<WheelCell> {
        self.layout.cell_of_color(self.current_color)
    }
}

impl Default for ColorPicker {
    fn default() -> Self {
        Self::new(WheelLayout::default())
    }
}
