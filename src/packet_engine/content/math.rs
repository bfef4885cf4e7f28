use crate::packet_engine::{
    helpers::solved,
    models::{ActivityTemplate, ActivityType},
};

fn math(id: &str, tier: u8, title: &str, prompt: &str, answer: &str, hint: Option<&str>) -> ActivityTemplate {
    solved(id, ActivityType::MathChallenge, tier, title, prompt, answer, hint)
}

pub fn templates() -> Vec<ActivityTemplate> {
    vec![
        math("math-balloons", 1, "Balloon Count",
            "I have 3 red balloons and 4 blue balloons. How many balloons do I have?",
            "7", Some("Count them all together")),
        math("math-ducks", 1, "Duck Pond",
            "5 ducks swim in a pond. 2 fly away. How many are left?",
            "3", Some("Take away the ones that flew")),

        math("math-flowers", 2, "Doubling Garden",
            "The flowers in my garden double every day. I have 3 on Monday. How many on Wednesday?",
            "12", Some("Monday 3, Tuesday ?, Wednesday ?")),
        math("math-stickers", 2, "Sticker Share",
            "12 stickers are shared equally between 3 friends. How many does each get?",
            "4", Some("Deal them out one at a time")),

        math("math-pattern", 3, "Number Pattern",
            "What comes next: 2, 5, 8, 11, ...?",
            "14", Some("Look at the gap between numbers")),
        math("math-pizza", 3, "Pizza Party",
            "A pizza has 8 slices. You eat 3 and your friend eats 2. What fraction is left?",
            "3/8", Some("Count the slices nobody ate")),

        math("math-rocket-fuel", 4, "Rocket Fuel",
            "A rocket burns 15 litres of fuel each minute. How much does it burn in 7 minutes?",
            "105 litres", None),
        math("math-magic-square", 4, "Magic Square",
            "Fill a 3x3 square with 1 to 9 so every row, column and diagonal adds to 15.",
            "2 7 6 / 9 5 1 / 4 3 8", Some("5 goes in the middle")),

        math("math-train-meet", 5, "Meeting Trains",
            "Two trains 120 km apart drive toward each other at 40 km/h and 20 km/h. When do they meet?",
            "After 2 hours", Some("Add the speeds together")),
        math("math-handshakes", 5, "Handshakes",
            "Six friends each shake hands with every other friend once. How many handshakes?",
            "15", Some("The first friend shakes 5 hands, the next one 4 new hands...")),
    ]
}
