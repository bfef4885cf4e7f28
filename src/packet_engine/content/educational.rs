use crate::packet_engine::{
    helpers::open,
    models::{ActivityTemplate, ActivityType, Layout},
};

/// A fact followed by a question the child answers in their own words.
fn nugget(id: &str, tier: u8, title: &str, fact: &str, wonder: &str) -> ActivityTemplate {
    let prompt = format!("{fact}\n\nI wonder: {wonder}");
    open(id, ActivityType::EducationalActivity, tier, title, &prompt, Layout::Lines)
}

pub fn templates() -> Vec<ActivityTemplate> {
    vec![
        nugget("edu-octopus-hearts", 1, "Ocean Fact",
            "An octopus has three hearts!", "Why would an animal need more than one heart?"),
        nugget("edu-bee-dance", 1, "Bug Fact",
            "Honeybees dance to tell each other where flowers are.", "How would you tell a friend where something is without talking?"),

        nugget("edu-moon-footprints", 2, "Space Fact",
            "Footprints on the Moon can last for millions of years because there is no wind.", "What would you write in the Moon dust?"),
        nugget("edu-sloth", 2, "Animal Fact",
            "Sloths can hold their breath longer than dolphins.", "Why might a slow animal need to hold its breath?"),

        nugget("edu-pyramids", 3, "History Fact",
            "The Great Pyramid was the tallest building in the world for almost 4000 years.", "How do you think they lifted the heavy stones?"),
        nugget("edu-water-cycle", 3, "Science Fact",
            "The water you drink may once have been drunk by a dinosaur.", "Where has your glass of water travelled?"),

        nugget("edu-volcano", 4, "Earth Fact",
            "There are volcanoes under the ocean that build new islands.", "What would be the first thing to live on a brand new island?"),
        nugget("edu-printing-press", 4, "Invention Fact",
            "Before the printing press, every book was copied by hand.", "How long would it take you to copy your favourite book?"),

        nugget("edu-light-speed", 5, "Physics Fact",
            "Sunlight takes about 8 minutes to reach Earth.", "If the Sun switched off, how long until we noticed?"),
        nugget("edu-dna", 5, "Biology Fact",
            "Humans share about 60% of their genes with bananas.", "What do people and bananas have in common?"),
    ]
}
