//! The default seed catalog: eight cards per theme.

use crate::card::{Card, Theme};
use crate::rarity::Rarity;

type Seed = (
    &'static str,
    &'static str,
    Rarity,
    &'static str,
    &'static str,
    &'static str,
);

const MINECRAFT: &[Seed] = &[
    (
        "mc_01",
        "Creeper",
        Rarity::Common,
        "💚",
        "images/creeper.webp",
        "An explosive creature that destroys everything in its path.",
    ),
    (
        "mc_02",
        "Enderman",
        Rarity::Rare,
        "👤",
        "images/enderman.webp",
        "A mysterious being that can teleport.",
    ),
    (
        "mc_03",
        "Diamond",
        Rarity::VeryRare,
        "💎",
        "images/diamant.webp",
        "The most precious ore in the world of Minecraft.",
    ),
    (
        "mc_04",
        "Ender Dragon",
        Rarity::Epic,
        "🐉",
        "images/ender_dragon.webp",
        "The final boss that rules over the End.",
    ),
    (
        "mc_05",
        "Steve",
        Rarity::Legendary,
        "🧑‍🔧",
        "images/steve.webp",
        "The legendary hero of Minecraft.",
    ),
    (
        "mc_06",
        "Zombie",
        Rarity::Common,
        "🧟",
        "images/zombie.webp",
        "An undead that wanders through the night.",
    ),
    (
        "mc_07",
        "Wither",
        Rarity::Epic,
        "💀",
        "images/wither.webp",
        "A destructive three-headed boss.",
    ),
    (
        "mc_08",
        "Emerald",
        Rarity::Rare,
        "💚",
        "images/emeraude.webp",
        "A precious gem used for trading.",
    ),
];

const SPACE: &[Seed] = &[
    (
        "space_01",
        "Sun",
        Rarity::Legendary,
        "☀️",
        "images/soleil.jpg",
        "Our star, the source of all life on Earth.",
    ),
    (
        "space_02",
        "Moon",
        Rarity::Common,
        "🌙",
        "images/lune.jpg",
        "Natural satellite of the Earth.",
    ),
    (
        "space_03",
        "Mars",
        Rarity::Rare,
        "🔴",
        "images/mars.jpg",
        "The red planet, a future human destination.",
    ),
    (
        "space_04",
        "Saturn",
        Rarity::VeryRare,
        "🪐",
        "images/saturne.jpg",
        "A planet with magnificent rings.",
    ),
    (
        "space_05",
        "Black Hole",
        Rarity::Epic,
        "⚫",
        "images/trou_noir.webp",
        "A cosmic object of infinite density.",
    ),
    (
        "space_06",
        "Galaxy",
        Rarity::Epic,
        "🌌",
        "images/galaxie.jpg",
        "A cluster of billions of stars.",
    ),
    (
        "space_07",
        "Comet",
        Rarity::Rare,
        "☄️",
        "images/comete.jpg",
        "An icy traveller from the edge of the solar system.",
    ),
    (
        "space_08",
        "Nebula",
        Rarity::VeryRare,
        "🌠",
        "images/nebuleuse.webp",
        "A cosmic cloud where stars are born.",
    ),
];

const DINOSAURS: &[Seed] = &[
    (
        "dino_01",
        "T-Rex",
        Rarity::Legendary,
        "🦖",
        "images/t_rex.png",
        "The king of Cretaceous predators.",
    ),
    (
        "dino_02",
        "Triceratops",
        Rarity::Rare,
        "🦕",
        "images/triceratops.webp",
        "A herbivore with three impressive horns.",
    ),
    (
        "dino_03",
        "Velociraptor",
        Rarity::VeryRare,
        "🦅",
        "images/velociraptor.webp",
        "A clever and fearsome hunter.",
    ),
    (
        "dino_04",
        "Diplodocus",
        Rarity::Common,
        "🦴",
        "images/diplodocus.jpg",
        "A giant with a long neck and an even longer tail.",
    ),
    (
        "dino_05",
        "Pterodactyl",
        Rarity::Rare,
        "🦋",
        "images/pterodactyle.jpg",
        "A flying reptile from prehistoric times.",
    ),
    (
        "dino_06",
        "Spinosaurus",
        Rarity::Epic,
        "🐊",
        "images/spinosaure.webp",
        "An aquatic predator with a sail on its back.",
    ),
    (
        "dino_07",
        "Ankylosaurus",
        Rarity::Common,
        "🛡️",
        "images/ankylosaure.jpg",
        "A herbivore armored like a tank.",
    ),
    (
        "dino_08",
        "Archaeopteryx",
        Rarity::Epic,
        "🪶",
        "images/archeopteryx.jpg",
        "The evolutionary link between dinosaurs and birds.",
    ),
];

/// Build the default catalog, grouped by theme.
pub fn default_catalog() -> Vec<Card> {
    [
        (Theme::Minecraft, MINECRAFT),
        (Theme::Space, SPACE),
        (Theme::Dinosaurs, DINOSAURS),
    ]
    .into_iter()
    .flat_map(|(theme, seeds)| {
        seeds
            .iter()
            .map(move |&(id, name, rarity, emoji, image, description)| {
                Card::new(id, name, theme, rarity)
                    .with_emoji(emoji)
                    .with_image(image)
                    .with_description(description)
            })
    })
    .collect()
}
