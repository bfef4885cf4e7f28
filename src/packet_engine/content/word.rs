use crate::packet_engine::{
    helpers::solved,
    models::{ActivityTemplate, ActivityType, Layout},
};

fn word(id: &str, tier: u8, title: &str, prompt: &str, answer: &str) -> ActivityTemplate {
    ActivityTemplate {
        layout: Layout::Lines,
        ..solved(id, ActivityType::WordActivity, tier, title, prompt, answer, None)
    }
}

pub fn templates() -> Vec<ActivityTemplate> {
    vec![
        word("word-rhyme-cat", 1, "Rhyme Time",
            "Write three words that rhyme with CAT.", "hat, bat, mat, sat, ..."),
        word("word-first-letters", 1, "Letter Patterns",
            "Circle the words that start with the same sound: sun, sock, moon, sand.", "sun, sock, sand"),

        word("word-ladder-cat-dog", 2, "Word Ladder",
            "Change one letter at a time to turn CAT into DOG.", "CAT, COT, COG, DOG"),
        word("word-compound", 2, "Word Glue",
            "Join two words to make a new one: sun + flower, rain + bow, foot + ball.", "sunflower, rainbow, football"),

        word("word-anagram-listen", 3, "Anagram",
            "Rearrange the letters of LISTEN to make a word that means 'not making noise'.", "SILENT"),
        word("word-opposites", 3, "Opposites",
            "Write the opposite of: ancient, generous, shallow.", "modern, selfish, deep"),

        word("word-ladder-cold-warm", 4, "Long Ladder",
            "Turn COLD into WARM, changing one letter per step.", "COLD, CORD, CARD, WARD, WARM"),
        word("word-hidden", 4, "Hidden Words",
            "Find the animal hidden in each sentence: 'The cab attacked the bus.' 'Eric owes me money.'", "bat, cow"),

        word("word-crossword-mini", 5, "Mini Crossword",
            "Fill a 3x3 grid so that every row and column spells a word. Row 1 is CAT.", "CAT / ARE / TEN"),
        word("word-palindromes", 5, "Palindromes",
            "Find three words that read the same backwards and forwards, one with five letters.", "e.g. level, kayak, radar"),
    ]
}
