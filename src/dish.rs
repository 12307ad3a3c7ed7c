/// A user-entered dish. Ids are assigned at creation and stay stable for the
/// lifetime of the entry; list order reflects entry order, not schedule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub prep_minutes: u32,
    pub cook_minutes: u32,
}

impl Dish {
    pub fn new(id: impl Into<String>, name: impl Into<String>, prep: u32, cook: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            prep_minutes: prep,
            cook_minutes: cook,
        }
    }
}

/// Parse a `NAME[:PREP]:COOK` dish spec from the command line.
///
/// `NAME:COOK` is accepted as shorthand (prep defaults to 0); a bare `NAME`
/// gets no durations and will be excluded from the schedule. Unparsable
/// numeric fields coerce to 0 rather than failing.
pub fn parse_dish_spec(spec: &str, index: usize) -> Dish {
    let parts: Vec<&str> = spec.split(':').collect();
    let (name, prep, cook) = match parts.as_slice() {
        [] | [_] => (spec.trim(), 0, 0),
        [name, cook] => (name.trim(), 0, parse_minutes(cook)),
        [head @ .., prep, cook] => {
            // Names may themselves contain colons; only the last two fields
            // are numeric.
            let name = head.join(":");
            return Dish::new(
                format!("d{}", index + 1),
                name.trim(),
                parse_minutes(prep),
                parse_minutes(cook),
            );
        }
    };
    Dish::new(format!("d{}", index + 1), name, prep, cook)
}

/// Coerce a minutes field: non-negative integer, anything else is 0.
pub fn parse_minutes(raw: &str) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(0)
}

/// Quick-add presets (name, prep minutes, cook minutes).
pub const PRESETS: &[(&str, u32, u32)] = &[
    ("Roast Turkey (12-14 lb)", 20, 210),
    ("Stuffing (baked)", 15, 45),
    ("Mashed Potatoes", 15, 30),
    ("Green Bean Casserole", 10, 30),
    ("Pumpkin Pie", 15, 55),
    ("Cranberry Sauce (scratch)", 10, 15),
    ("Turkey Gravy", 10, 15),
    ("Sweet Potato Casserole", 15, 35),
    ("Mac & Cheese (baked)", 15, 30),
    ("Brussels Sprouts (roasted)", 10, 25),
    ("Dinner Rolls (bake)", 5, 12),
    ("Apple Pie", 15, 60),
    ("Pecan Pie", 15, 55),
    ("Cornbread", 10, 20),
    ("Glazed Carrots", 10, 15),
    ("Roasted Potatoes", 10, 35),
    ("Corn Casserole", 10, 45),
    ("Green Salad (assemble)", 10, 0),
    ("Turkey Stock (stovetop)", 10, 120),
    ("Glazed Honey Ham (8-10 lb, pre-cooked)", 10, 100),
];

/// Case-insensitive preset lookup: exact name first, then substring.
pub fn find_preset(query: &str) -> Option<(&'static str, u32, u32)> {
    let needle = query.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return None;
    }
    PRESETS
        .iter()
        .find(|(name, _, _)| name.to_ascii_lowercase() == needle)
        .or_else(|| {
            PRESETS
                .iter()
                .find(|(name, _, _)| name.to_ascii_lowercase().contains(&needle))
        })
        .copied()
}
