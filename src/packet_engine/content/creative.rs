use crate::packet_engine::{
    helpers::open,
    models::{ActivityTemplate, ActivityType, Layout},
};

fn draw(id: &str, tier: u8, title: &str, prompt: &str) -> ActivityTemplate {
    open(id, ActivityType::CreativePrompt, tier, title, prompt, Layout::DrawingBox)
}

fn write(id: &str, tier: u8, title: &str, prompt: &str) -> ActivityTemplate {
    open(id, ActivityType::CreativePrompt, tier, title, prompt, Layout::Lines)
}

pub fn templates() -> Vec<ActivityTemplate> {
    vec![
        draw("creative-perfect-day", 1, "Perfect Day",
            "Draw your perfect day from morning to night."),
        draw("creative-circle-animals", 1, "Circle Zoo",
            "Draw an animal using only circles."),

        draw("creative-underwater-city", 2, "Underwater City",
            "Design a city under the sea. Where do people sleep? What do they eat?"),
        write("creative-pet-dragon", 2, "My Pet Dragon",
            "Write three sentences about a day with your pet dragon."),

        draw("creative-invention", 3, "Invention Time",
            "Invent something that doesn't exist yet. Draw it and label its parts."),
        write("creative-story-start", 3, "Story Starter",
            "Finish the story: 'When I opened the box, it started to glow...'"),

        write("creative-comic", 4, "Comic Strip",
            "Plan a four-panel comic where the hero solves a problem without talking."),
        draw("creative-map-island", 4, "Secret Island",
            "Draw a map of a secret island with a legend for at least five symbols."),

        write("creative-letter-future", 5, "Letter to the Future",
            "Write a letter to yourself ten years from now. What do you hope has changed?"),
        write("creative-two-views", 5, "Two Sides",
            "Tell the story of Goldilocks from the bears' point of view."),
    ]
}
