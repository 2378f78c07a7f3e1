use crate::grid::grid_side;
use crate::rules::PuzzleRules;

#[derive(Clone, Copy, Debug)]
pub struct PuzzleCatalogEntry {
    pub label: &'static str,
    pub slug: &'static str,
    pub src: &'static str,
    pub width: u32,
    pub height: u32,
}

pub const DEFAULT_PUZZLE_SLUG: &str = "harbor-dawn";

pub const PUZZLE_CATALOG: &[PuzzleCatalogEntry] = &[
    PuzzleCatalogEntry {
        label: "Harbor Dawn",
        slug: "harbor-dawn",
        src: "puzzles/harbor-dawn.jpg",
        width: 1600,
        height: 1067,
    },
    PuzzleCatalogEntry {
        label: "Moss Garden",
        slug: "moss-garden",
        src: "puzzles/moss-garden.jpg",
        width: 1200,
        height: 900,
    },
    PuzzleCatalogEntry {
        label: "Paper Lanterns",
        slug: "paper-lanterns",
        src: "puzzles/paper-lanterns.jpg",
        width: 640,
        height: 427,
    },
];

pub fn puzzle_by_slug(slug: &str) -> Option<&'static PuzzleCatalogEntry> {
    let trimmed = slug.trim();
    PUZZLE_CATALOG
        .iter()
        .find(|entry| entry.slug.eq_ignore_ascii_case(trimmed))
}

impl PuzzleCatalogEntry {
    /// Grid the sizing rules would pick for this entry, without decoding.
    pub fn grid_side(&self, rules: &PuzzleRules) -> u32 {
        grid_side(self.width, self.height, rules).unwrap_or(rules.grid_side_min)
    }
}
