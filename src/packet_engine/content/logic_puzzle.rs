use crate::packet_engine::{helpers::logic_grid, models::ActivityTemplate};

pub fn templates() -> Vec<ActivityTemplate> {
    vec![
        logic_grid("logic-pet-colors", 1, "Pet Colors",
            "Three pets each wear a different collar: red, blue or green.",
            &[
                "The cat does not wear red.",
                "The dog wears blue.",
            ],
            "Dog: blue, Cat: green, Fish: red"),
        logic_grid("logic-lunchboxes", 1, "Lunchbox Mix-Up",
            "Ana, Ben and Cleo each packed one fruit: apple, banana or grape.",
            &[
                "Ben does not like apples.",
                "Cleo packed the banana.",
            ],
            "Ana: apple, Ben: grape, Cleo: banana"),

        logic_grid("logic-ocean-friends", 2, "Ocean Friends",
            "Three sea creatures live in three places: the reef, the cave and the kelp forest.",
            &[
                "The octopus lives in the cave.",
                "The turtle does not live in the kelp forest.",
                "The seahorse is not in the reef.",
            ],
            "Octopus: cave, Turtle: reef, Seahorse: kelp forest"),
        logic_grid("logic-space-crew", 2, "Space Crew",
            "Three astronauts each fly to a different planet: Mars, Jupiter or Saturn.",
            &[
                "Zoe is not going to Mars.",
                "Leo is going to the planet with rings.",
            ],
            "Leo: Saturn, Zoe: Jupiter, Max: Mars"),

        logic_grid("logic-treasure-map", 3, "Treasure Hunters",
            "Four pirates each buried one treasure: gold, pearls, a crown or a map.",
            &[
                "Captain Red buried the crown.",
                "Peg did not bury gold or pearls.",
                "Finn buried something shiny from the sea.",
                "Sly did not bury the map.",
            ],
            "Red: crown, Peg: map, Finn: pearls, Sly: gold"),
        logic_grid("logic-science-fair", 3, "Science Fair",
            "Four kids built volcanoes, rockets, robots and crystals.",
            &[
                "Mia's project glows in the dark.",
                "Raj built something that flies.",
                "Tess did not build the volcano.",
            ],
            "Mia: crystals, Raj: rocket, Tess: robot, Owen: volcano"),

        logic_grid("logic-castle-rooms", 4, "Castle Rooms",
            "Four knights guard four towers (north, south, east, west) and carry four different shields.",
            &[
                "The knight with the dragon shield guards the north tower.",
                "Sir Amos guards a tower opposite the knight with the lion shield.",
                "Sir Bram carries the eagle shield and does not guard the east tower.",
                "Dame Cora guards the south tower.",
                "The owl shield is in the east tower.",
            ],
            "North: Dame Isla (dragon), South: Dame Cora (lion), East: Sir Amos (owl), West: Sir Bram (eagle)"),
        logic_grid("logic-time-travelers", 4, "Time Travelers",
            "Four travelers visited four eras: dinosaurs, pyramids, castles and the moon landing.",
            &[
                "Nia went further back than anyone else.",
                "Oscar did not see the pyramids.",
                "Pia saw something built of stone.",
                "Quinn's era is the most recent.",
                "Pia did not visit a castle.",
            ],
            "Nia: dinosaurs, Pia: pyramids, Oscar: castles, Quinn: moon landing"),

        logic_grid("logic-train-station", 5, "The Train Station",
            "Five trains leave at 1, 2, 3, 4 and 5 o'clock for five cities, each with a different colour.",
            &[
                "The red train leaves before the blue train but after the green one.",
                "The train to Oslo leaves at 3.",
                "The yellow train leaves last and does not go to Rome.",
                "The green train goes to Paris and leaves first.",
                "The Rome train leaves right after the Paris train.",
                "The white train goes to Vienna.",
            ],
            "1 green Paris, 2 red Rome, 3 blue Oslo, 4 white Vienna, 5 yellow Madrid"),
        logic_grid("logic-museum-thief", 5, "The Museum Mystery",
            "Five visitors wore five hats; one of them moved the painting.",
            &[
                "The person in the top hat was in the café all afternoon.",
                "Eli wore the beret and was never upstairs.",
                "The painting hung upstairs.",
                "Fay and the person in the cap were together the whole time, downstairs.",
                "Gus wore the helmet and went upstairs once.",
                "Hana wore the top hat.",
            ],
            "Gus moved the painting"),
    ]
}
