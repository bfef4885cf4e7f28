use crate::packet_engine::{helpers::riddle, models::ActivityTemplate};

pub fn templates() -> Vec<ActivityTemplate> {
    vec![
        // tier 1: concrete objects
        riddle("riddle-clock", 1,
            "I have hands but cannot clap. I have a face but cannot see. What am I?",
            "A clock", "Think about what tells time"),
        riddle("riddle-sponge", 1,
            "I'm full of holes but I can still hold water. What am I?",
            "A sponge", "Found in the kitchen or bathroom"),
        riddle("riddle-comb", 1,
            "I have teeth but cannot bite. You use me every morning. What am I?",
            "A comb", "Look in the bathroom"),

        // tier 2
        riddle("riddle-coin", 2,
            "What has a head and a tail but no body?",
            "A coin", "Check your pocket"),
        riddle("riddle-candle", 2,
            "I'm tall when I'm young and short when I'm old. What am I?",
            "A candle", "I give light"),
        riddle("riddle-fish-tank", 2,
            "Three fish are in a tank. One swims away. How many are left in the tank?",
            "Three", "Can a fish swim out of a tank?"),

        // tier 3: wordplay
        riddle("riddle-teacher", 3,
            "What has 'tea' in it but you can't drink it?",
            "A teacher", "Someone who helps you learn"),
        riddle("riddle-cloud", 3,
            "I fly without wings, I cry without eyes. Whenever I go, darkness follows. What am I?",
            "A cloud", "Look up at the sky"),
        riddle("riddle-sheep", 3,
            "A farmer has 17 sheep. All but 9 run away. How many are left?",
            "Nine", "Read 'all but' very carefully"),

        // tier 4
        riddle("riddle-footsteps", 4,
            "The more you take, the more you leave behind. What am I?",
            "Footsteps", "Think about walking"),
        riddle("riddle-envelope", 4,
            "What word starts with 'e', ends with 'e', and usually contains only one letter?",
            "An envelope", "Mail goes inside it"),
        riddle("riddle-short", 4,
            "What word becomes shorter when you add two letters to it?",
            "Short", "Try adding 'er'"),

        // tier 5: lateral thinking
        riddle("riddle-map", 5,
            "I have cities but no houses, forests but no trees, and water but no fish. What am I?",
            "A map", "It shows places but isn't one"),
        riddle("riddle-elevator", 5,
            "A man on the 20th floor rides the elevator down every morning. Coming home he rides \
             only to the 10th floor and walks the rest, unless someone else is in the elevator. Why?",
            "He can only reach the button for the 10th floor", "Think about his height"),
        riddle("riddle-boat", 5,
            "You see a boat full of people. You look again and there isn't a single person on board, \
             yet it hasn't sunk. How?",
            "Everyone on board is married", "Think about the word 'single'"),
    ]
}
