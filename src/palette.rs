//! Colors for game elements and the per-theme palettes

/// RGBA color with components in 0..=1
pub type Color = [f32; 4];

/// Build a color from 8-bit channels
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ]
}

pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    rgba(r, g, b, 255)
}

pub const TRANSPARENT: Color = [0.0, 0.0, 0.0, 0.0];
pub const WHITE: Color = rgb(255, 255, 255);
pub const BACKGROUND: Color = rgb(0, 0, 0);

/// True if drawing this color would produce nothing
#[inline]
pub fn is_transparent(color: Color) -> bool {
    color[3] <= 0.0
}

pub const SHIP_OUTLINE: Color = WHITE;
pub const SHIP_FILL: Color = rgba(255, 255, 255, 127);

pub const PROJECTILE_OUTLINE: Color = TRANSPARENT;
pub const PROJECTILE_FILL: Color = rgb(192, 192, 255);

pub const OBSTACLE_OUTLINE: Color = rgb(191, 191, 191);
pub const OBSTACLE_FILL_DEFAULT: Color = rgb(63, 63, 63);

pub const WRECKAGE_OUTLINE: Color = rgb(255, 95, 0);
pub const WRECKAGE_FILL: Color = TRANSPARENT;

pub const STARDUST_DEFAULT: Color = WHITE;

/// Number of color themes the long cycle walks through
pub const THEME_COUNT: usize = 7;

/// Obstacle fill per theme, for fields 1 and 2 (field 0 uses the default)
pub const OBSTACLE_FILLS: [[Color; 2]; THEME_COUNT] = [
    [rgb(95, 63, 47), rgb(191, 63, 0)],
    [rgb(47, 63, 95), rgb(0, 63, 191)],
    [rgb(63, 95, 47), rgb(63, 191, 0)],
    [rgb(63, 47, 95), rgb(63, 0, 191)],
    [rgb(95, 47, 63), rgb(191, 0, 63)],
    [rgb(47, 95, 63), rgb(0, 191, 63)],
    [SHIP_FILL, TRANSPARENT],
];

/// Front background layer color per theme in field 1
pub const STARDUST_FILLS: [Color; THEME_COUNT] = [
    rgb(255, 127, 0),
    rgb(0, 127, 255),
    rgb(127, 255, 0),
    rgb(127, 0, 255),
    rgb(255, 0, 127),
    rgb(0, 255, 127),
    STARDUST_DEFAULT,
];
