/// Resident population in millions per state code (2020 census, 50 states + DC).
static POPULATION_MILLIONS: &[(&str, f64)] = &[
    ("AL", 5.024),
    ("AK", 0.733),
    ("AZ", 7.152),
    ("AR", 3.012),
    ("CA", 39.538),
    ("CO", 5.774),
    ("CT", 3.606),
    ("DE", 0.990),
    ("DC", 0.690),
    ("FL", 21.538),
    ("GA", 10.712),
    ("HI", 1.455),
    ("ID", 1.839),
    ("IL", 12.813),
    ("IN", 6.786),
    ("IA", 3.190),
    ("KS", 2.938),
    ("KY", 4.506),
    ("LA", 4.658),
    ("ME", 1.362),
    ("MD", 6.177),
    ("MA", 7.030),
    ("MI", 10.077),
    ("MN", 5.706),
    ("MS", 2.961),
    ("MO", 6.154),
    ("MT", 1.084),
    ("NE", 1.962),
    ("NV", 3.105),
    ("NH", 1.378),
    ("NJ", 9.289),
    ("NM", 2.118),
    ("NY", 20.201),
    ("NC", 10.439),
    ("ND", 0.779),
    ("OH", 11.799),
    ("OK", 3.959),
    ("OR", 4.237),
    ("PA", 13.003),
    ("RI", 1.097),
    ("SC", 5.118),
    ("SD", 0.887),
    ("TN", 6.911),
    ("TX", 29.146),
    ("UT", 3.272),
    ("VT", 0.643),
    ("VA", 8.631),
    ("WA", 7.705),
    ("WV", 1.794),
    ("WI", 5.894),
    ("WY", 0.577),
];

pub fn population_millions(state: &str) -> Option<f64> {
    POPULATION_MILLIONS
        .iter()
        .find(|(code, _)| *code == state)
        .map(|(_, millions)| *millions)
}

/// Incidents per 100k residents: `(count / millions) * 0.1`.
pub fn rate_per_100k(count: usize, population_millions: f64) -> f64 {
    (count as f64 / population_millions) * 0.1
}
