use crate::models::Subject;

/// The fixed ordered palette of subject display colors
///
/// New subjects take the first color not yet in use. With more than 12
/// subjects, colors repeat from the start of the palette; that collision is
/// accepted behavior, not an error.
pub const SUBJECT_COLORS: [&str; 12] = [
    "#ef4444", // red
    "#f97316", // orange
    "#f59e0b", // amber
    "#84cc16", // lime
    "#10b981", // emerald
    "#06b6d4", // cyan
    "#3b82f6", // blue
    "#6366f1", // indigo
    "#8b5cf6", // violet
    "#ec4899", // pink
    "#6b7280", // gray
    "#374151", // gray-700
];

/// Picks the display color for a subject name
///
/// A known subject keeps its color, matched case-insensitively so spelling
/// variants of the same name never diverge. An unknown subject gets the
/// first palette color no existing subject uses, falling back to the first
/// palette color when all 12 are taken.
pub fn subject_color(name: &str, existing: &[Subject]) -> String {
    let lowered = name.to_lowercase();
    if let Some(subject) = existing.iter().find(|s| s.get_name().to_lowercase() == lowered) {
        return subject.get_color();
    }

    let used: Vec<String> = existing.iter().map(|s| s.get_color()).collect();
    SUBJECT_COLORS
        .iter()
        .find(|color| !used.contains(&color.to_string()))
        .unwrap_or(&SUBJECT_COLORS[0])
        .to_string()
}
