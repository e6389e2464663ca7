//! Bank item categorization by ordered keyword rules.
//!
//! Rules are tested top to bottom and the first hit wins, so set pieces and
//! currencies sit above the broad equipment keywords that would shadow them.

pub const DEFAULT_CATEGORY: (&str, &str) = ("Miscellaneous", "Other");

/// A (category, subcategory) pair and the lowercase keywords that select it.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: &'static str,
    pub subcategory: &'static str,
    pub keywords: &'static [&'static str],
}

const fn rule(
    category: &'static str,
    subcategory: &'static str,
    keywords: &'static [&'static str],
) -> CategoryRule {
    CategoryRule {
        category,
        subcategory,
        keywords,
    }
}

/// First match wins, so specific keywords come before generic ones.
#[rustfmt::skip]
pub const CATEGORY_RULES: &[CategoryRule] = &[
    // Barrows
    rule("Barrows", "Ahrim's", &["ahrim"]),
    rule("Barrows", "Dharok's", &["dharok"]),
    rule("Barrows", "Guthan's", &["guthan"]),
    rule("Barrows", "Karil's", &["karil"]),
    rule("Barrows", "Torag's", &["torag"]),
    rule("Barrows", "Verac's", &["verac"]),
    // Moon armor
    rule("Moon Armor", "Blood Moon", &["blood moon"]),
    rule("Moon Armor", "Blue Moon", &["blue moon"]),
    rule("Moon Armor", "Eclipse Moon", &["eclipse moon"]),
    // Currency
    rule("Currency", "Coins & Tokens", &[
        "coins", "platinum token", "tokkul", "trading sticks", "numulite", "golden nugget",
        "mark of grace", "stardust", "crystal shard", "amylase", "warrior guild token",
        "ecto-token",
    ]),
    // Runes
    rule("Runes", "Elemental", &["air rune", "water rune", "earth rune", "fire rune"]),
    rule("Runes", "Catalytic", &[
        "mind rune", "body rune", "cosmic rune", "chaos rune", "nature rune", "law rune",
        "death rune", "blood rune", "soul rune", "astral rune", "wrath rune",
    ]),
    rule("Runes", "Combination", &[
        "mist rune", "dust rune", "mud rune", "smoke rune", "steam rune", "lava rune",
    ]),
    rule("Runes", "Talismans", &["talisman"]),
    // Food, raw fish before cooked
    rule("Food", "Raw Fish", &[
        "raw shark", "raw monkfish", "raw lobster", "raw swordfish", "raw tuna", "raw salmon",
        "raw trout", "raw bass", "raw cod", "raw pike", "raw anglerfish", "raw manta ray",
        "raw karambwan", "raw sardine",
    ]),
    rule("Food", "Cooked Fish", &[
        "shark", "monkfish", "lobster", "swordfish", "tuna", "salmon", "trout", "bass", "cod",
        "pike", "anglerfish", "manta ray", "sea turtle", "dark crab", "karambwan",
    ]),
    rule("Food", "Cooked Meals", &["stew", "pie", "potato", "pizza"]),
    rule("Food", "Fruit", &[
        "fruit", "berries", "papaya", "coconut", "dragonfruit", "grapes", "watermelon", "calquat",
    ]),
    rule("Food", "Other Food", &["sweets", "cake", "bread", "moth"]),
    // Potions
    rule("Potions", "Unfinished", &["potion (unf)"]),
    rule("Potions", "Combat Potions", &[
        "super combat", "divine", "ranging potion", "magic potion", "super strength",
        "super attack", "super defence",
    ]),
    rule("Potions", "Restoration", &[
        "saradomin brew", "prayer potion", "super restore", "sanfew", "guthix rest",
    ]),
    rule("Potions", "Skilling Potions", &[
        "stamina", "energy potion", "agility potion", "hunter potion",
    ]),
    rule("Potions", "Other Potions", &[
        "antifire", "antidote", "antipoison", "antivenom", "relicym", "balm",
    ]),
    // Slayer
    rule("Slayer", "Ensouled Heads", &["ensouled"]),
    rule("Slayer", "Slayer Equipment", &[
        "slayer helmet", "nose peg", "earmuffs", "face mask", "mirror shield", "rock hammer",
        "bag of salt", "ice cooler", "witchwood icon", "slayer bell", "fungicide",
        "slayer's staff", "leaf-bladed",
    ]),
    rule("Slayer", "Slayer Drops", &[
        "dark totem", "ancient shard", "brimstone key", "larran's key",
    ]),
    // Ammunition, before equipment so darts and knives land here
    rule("Ammunition", "Arrows", &["arrow", "arrowtips"]),
    rule("Ammunition", "Bolts", &["bolt"]),
    rule("Ammunition", "Cannonballs", &["cannonball"]),
    rule("Ammunition", "Other Ammo", &[
        "javelin", "dart", "thrownaxe", "chinchompa", "atlatl dart",
    ]),
    // Teleportation
    rule("Teleportation", "Jewelry", &[
        "games necklace", "ring of dueling", "amulet of glory", "ring of wealth",
        "necklace of passage", "digsite pendant", "burning amulet", "skills necklace",
        "combat bracelet",
    ]),
    rule("Teleportation", "Tablets", &[
        "teleport to house", "varrock teleport", "lumbridge teleport", "falador teleport",
        "camelot teleport",
    ]),
    rule("Teleportation", "Other Teleports", &[
        "ectophial", "royal seed pod", "xeric's talisman", "drakan's medallion",
        "teleport crystal", "pharaoh's sceptre", "skull sceptre",
    ]),
    // Clue items
    rule("Clue Items", "Clue Scrolls", &["clue scroll", "scroll box"]),
    rule("Clue Items", "Clue Rewards", &["firelighter", "blessing", "ornament kit"]),
    // Skilling
    rule("Skilling", "Herbs", &[
        "grimy", "guam leaf", "marrentill", "tarromin", "harralander", "ranarr", "irit leaf",
        "avantoe", "kwuarm", "cadantine", "lantadyme", "dwarf weed", "torstol", "snapdragon",
        "toadflax",
    ]),
    rule("Skilling", "Seeds", &["seed"]),
    rule("Skilling", "Ores", &[" ore", "coal"]),
    rule("Skilling", "Bars", &[" bar"]),
    rule("Skilling", "Logs", &["logs"]),
    rule("Skilling", "Planks", &["plank"]),
    rule("Skilling", "Gems", &[
        "sapphire", "emerald", "ruby", "diamond", "dragonstone", "onyx", "opal", "jade", "topaz",
        "uncut",
    ]),
    rule("Skilling", "Hides & Leather", &["dragonhide", "leather", "cowhide"]),
    rule("Skilling", "Bones", &["bones"]),
    rule("Skilling", "Ashes", &["ashes"]),
    rule("Skilling", "Essence", &["essence"]),
    rule("Skilling", "Farming", &["compost", "bottomless", "secateurs", "seaweed", "spore"]),
    rule("Skilling", "Fishing", &[
        "bait", "feather", "harpoon", "fishing net", "fishing rod", "sandworms",
    ]),
    rule("Skilling", "Hunter", &[
        "trap", "snare", "box trap", "noose", "fur", "kebbit", "salamander", "chinchompa",
    ]),
    rule("Skilling", "Construction", &["nail", "bolt of cloth", "limestone", "marble"]),
    rule("Skilling", "Crafting", &["molten glass", "glassblowing", "lantern lens", "orb"]),
    // Equipment, last of the real categories since its keywords are broad
    rule("Equipment", "Melee Weapons", &[
        "scimitar", "longsword", "sword", "dagger", "mace", "warhammer", "battleaxe", "2h sword",
        "halberd", "spear", "whip", "rapier", "hasta", "claws", "maul", "axe",
    ]),
    rule("Equipment", "Ranged Weapons", &["shortbow", "longbow", "crossbow", "blowpipe"]),
    rule("Equipment", "Magic Weapons", &["staff", "wand", "trident"]),
    rule("Equipment", "Helmets", &["helm", "hat", "hood", "coif", "mask", "faceguard"]),
    rule("Equipment", "Body Armor", &[
        "platebody", "chainbody", "body", "top", "torso", "chestplate", "hauberk", "robetop",
    ]),
    rule("Equipment", "Leg Armor", &[
        "platelegs", "plateskirt", "chaps", "tassets", "cuisse", "greaves", "robeskirt",
        "robe bottom",
    ]),
    rule("Equipment", "Shields", &["shield", "defender", "kiteshield", "sq shield", "book of"]),
    rule("Equipment", "Gloves", &["gloves", "vambraces", "gauntlets"]),
    rule("Equipment", "Boots", &["boots", "sandals", "shoes"]),
    rule("Equipment", "Capes", &["cape", "cloak", "ava's"]),
    rule("Equipment", "Amulets & Necklaces", &[
        "amulet", "necklace", "fury", "torture", "anguish", "tormented",
    ]),
    rule("Equipment", "Rings", &[
        "ring of", "berserker ring", "archers ring", "seers ring", "warrior ring", "ring (i)",
    ]),
    rule("Equipment", "Bracelets", &["bracelet"]),
    // Quest items
    rule("Quest Items", "Quest Items", &["greegree", "sigil", "seal of passage"]),
    // Catch-alls
    rule("Miscellaneous", "Tools", &[
        "hammer", "chisel", "knife", "saw", "needle", "tinderbox", "spade", "rake", "trowel",
        "pickaxe",
    ]),
    rule("Miscellaneous", "Containers", &[
        "bucket", "jug", "vial", "pot", "bowl", "basket", "sack", "pouch",
    ]),
];

/// Classify an item name, returning `(category, subcategory)`.
pub fn categorize_item(name: &str) -> (&'static str, &'static str) {
    let lower = name.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|r| r.keywords.iter().any(|k| lower.contains(k)))
        .map(|r| (r.category, r.subcategory))
        .unwrap_or(DEFAULT_CATEGORY)
}
