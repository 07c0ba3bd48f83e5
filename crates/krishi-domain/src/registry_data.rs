//! Static domain data: greetings, crop aliases, topic synonyms, the
//! advisory fact table, and reply templates.
//!
//! Split from `registry.rs` so the matching logic stays readable. All
//! arrays are `pub(crate)`, consumed only through `Registry` construction.

use crate::registry::{Crop, Topic};

/// Tokens that mark a turn as a greeting or a capability question.
/// Multi-word tokens match across any run of whitespace.
pub(crate) const GREETING_TERMS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "namaste",
    "good morning",
    "good afternoon",
    "good evening",
    "how are you",
    "what can you do",
    "what is this",
    "who are you",
];

/// Word-boundary alias terms per crop.
pub(crate) const CROP_ALIASES: &[(Crop, &[&str])] = &[
    (Crop::Maize, &["maize"]),
    (Crop::Wheat, &["wheat"]),
    (Crop::Rice, &["rice", "paddy"]),
    (Crop::Corn, &["corn", "sweet corn"]),
    (Crop::Soybean, &["soybean", "soya bean", "soya"]),
];

/// Synonym keywords per topic.
pub(crate) const TOPIC_SYNONYMS: &[(Topic, &[&str])] = &[
    (
        Topic::CropHealth,
        &[
            "crop health",
            "monitoring",
            "nutrient",
            "nutrients",
            "deficiency",
            "disease",
            "diseases",
            "yellowing",
            "chlorosis",
        ],
    ),
    (
        Topic::PestManagement,
        &[
            "pest",
            "pests",
            "detection",
            "insect",
            "insects",
            "control",
            "management",
            "ipm",
            "aphid",
            "aphids",
            "borer",
        ],
    ),
    (
        Topic::WeedControl,
        &[
            "weed", "weeds", "herbicide", "herbicides", "weeding", "mulching",
        ],
    ),
    (
        Topic::Irrigation,
        &[
            "irrigation",
            "water",
            "watering",
            "moisture",
            "drought",
            "drip",
            "sprinkler",
        ],
    ),
];

/// Tokens that, in isolation, suggest a query is unrelated to agriculture.
/// Informational only: logged when observed, never the basis for a decision.
pub(crate) const OFFTOPIC_TERMS: &[&str] = &[
    "gold",
    "silver",
    "stock",
    "bitcoin",
    "crypto",
    "machine learning",
    "artificial intelligence",
    "programming",
    "recipe",
    "cooking",
    "biryani",
    "restaurant",
    "movie",
    "music",
    "sports",
    "cricket",
    "football",
    "politics",
    "election",
    "medicine",
    "doctor",
];

/// Advisory fact table, keyed by (crop, topic).
pub(crate) const FACTS: &[(Crop, Topic, &str)] = &[
    (
        Crop::Maize,
        Topic::CropHealth,
        "Common issues are nitrogen deficiency (yellowing lower leaves), borer damage \
         (holes in stems), and leaf blight. Apply urea at 120 kg/ha in two or three splits.",
    ),
    (
        Crop::Maize,
        Topic::PestManagement,
        "Fall armyworm is the major pest. Use pheromone traps and spray chlorantraniliprole \
         at 0.4 ml/L. For stem borer, apply carbofuran at 1 kg/ha at the whorl stage.",
    ),
    (
        Crop::Maize,
        Topic::WeedControl,
        "Apply atrazine at 1 kg/ha pre-emergence. Post-emergence, use 2,4-D at 1 kg/ha at \
         the 3-4 leaf stage. Hand weed once at 20-25 days after sowing.",
    ),
    (
        Crop::Maize,
        Topic::Irrigation,
        "Critical stages are knee-high, tasseling, and grain filling. Give 5-6 irrigations \
         and avoid water stress during flowering.",
    ),
    (
        Crop::Wheat,
        Topic::CropHealth,
        "Watch for rust diseases (yellow, brown, black) and spray propiconazole 0.1% at the \
         first sign. Nitrogen: 120 kg/ha in three splits (basal, tillering, jointing).",
    ),
    (
        Crop::Wheat,
        Topic::PestManagement,
        "Aphids are the common pest; spray imidacloprid at 0.3 ml/L or dimethoate at 2 ml/L. \
         For termites, apply chlorpyrifos at 2.5 L/ha with the last plowing.",
    ),
    (
        Crop::Wheat,
        Topic::WeedControl,
        "For Phalaris minor use sulfosulfuron at 25 g/ha. Broadleaf weeds: 2,4-D at 500 g/ha \
         at 30-35 days after sowing. Pre-emergence: pendimethalin at 1 kg/ha.",
    ),
    (
        Crop::Wheat,
        Topic::Irrigation,
        "Critical stages are crown root initiation (20-25 days after sowing), tillering, \
         jointing, flowering, and grain filling. Five to six irrigations in total.",
    ),
    (
        Crop::Rice,
        Topic::CropHealth,
        "Blast is the serious disease; spray tricyclazole at 0.6 g/L. For bacterial blight \
         use copper oxychloride at 3 g/L. Zinc deficiency is common — apply zinc sulfate at \
         25 kg/ha.",
    ),
    (
        Crop::Rice,
        Topic::PestManagement,
        "For stem borer use cartap hydrochloride at 2 g/L. Brown planthopper: spray \
         buprofezin at 1 ml/L. Leaf folder: apply chlorpyrifos at 2 ml/L.",
    ),
    (
        Crop::Rice,
        Topic::WeedControl,
        "Pre-emergence butachlor at 2.5 L/ha within three days of transplanting. \
         Post-emergence bispyribac sodium at 25 g/ha at 15-20 days after transplanting.",
    ),
    (
        Crop::Rice,
        Topic::Irrigation,
        "Maintain 5 cm of water for the first 10 days, then 2-3 cm of standing water. Drain \
         10 days before harvest. Alternate wetting and drying saves about 30% water.",
    ),
    (
        Crop::Corn,
        Topic::CropHealth,
        "Watch for downy mildew and spray metalaxyl at 2 g/L. Sweet corn takes nitrogen at \
         150 kg/ha. For boron deficiency apply borax at 10 kg/ha.",
    ),
    (
        Crop::Corn,
        Topic::PestManagement,
        "Corn borer: spray lambda-cyhalothrin at 0.5 ml/L. Earworm: apply spinosad at \
         0.5 ml/L at the silk stage. Aphids: imidacloprid at 0.3 ml/L.",
    ),
    (
        Crop::Corn,
        Topic::WeedControl,
        "Pre-emergence atrazine at 1-1.5 kg/ha. Post-emergence tembotrione at 120 ml/ha at \
         the 2-3 leaf stage. Mulching cuts weed pressure by around 70%.",
    ),
    (
        Crop::Corn,
        Topic::Irrigation,
        "Sweet corn needs more water than field maize. Irrigate at the 6-leaf, tasseling, \
         silking, and grain-filling stages. Drip irrigation suits sweet corn well.",
    ),
    (
        Crop::Soybean,
        Topic::CropHealth,
        "Yellow mosaic virus is the major issue — use resistant varieties. Rhizobium seed \
         inoculation at 5 g/kg of seed is essential. Phosphorus: 60-80 kg P2O5/ha.",
    ),
    (
        Crop::Soybean,
        Topic::PestManagement,
        "Girdle beetle: spray quinalphos at 2 ml/L. Stem fly: use carbofuran at 1 kg/ha. \
         Pod borer: apply indoxacarb at 0.5 ml/L at pod formation.",
    ),
    (
        Crop::Soybean,
        Topic::WeedControl,
        "Pre-emergence pendimethalin at 1 kg/ha. Post-emergence imazethapyr at 100 g/ha at \
         15-20 days after sowing, plus one hand weeding at 30-35 days.",
    ),
    (
        Crop::Soybean,
        Topic::Irrigation,
        "Critical stages are flowering and pod filling; give 2-3 irrigations if rainfall is \
         short. Avoid waterlogging — good drainage matters more than extra water.",
    ),
];

/// Topic-level answers used when no crop is named and none can be carried over.
pub(crate) const GENERIC_TOPIC_ANSWERS: &[(Topic, &str)] = &[
    (
        Topic::CropHealth,
        "Yellowing leaves usually point to nitrogen deficiency — apply urea (46-0-0) at \
         50-100 kg/ha. Brown leaf edges suggest potassium deficiency; use muriate of potash \
         at 40-60 kg/ha. Soil testing every 2-3 years keeps nutrition on track.",
    ),
    (
        Topic::PestManagement,
        "Start with integrated pest management: cultural practices first (rotation, \
         resistant varieties), then biological control (natural predators, neem products), \
         and selective chemicals only when pests cross the economic threshold.",
    ),
    (
        Topic::WeedControl,
        "Intervene early. Manual weeding works best on small plots; pre-emergence \
         herbicides such as pendimethalin or atrazine stop weeds before they germinate, and \
         post-emergence products target growing weeds.",
    ),
    (
        Topic::Irrigation,
        "Drip irrigation saves 30-50% water over flooding. Schedule water around growth \
         stage — flowering and fruit development are the critical periods — and keep soil \
         moisture at 60-80% of field capacity.",
    ),
];

/// Fallback advisory for a (crop, topic) pair with no registered fact.
/// `{crop}` is replaced with the crop's canonical name.
pub(crate) const TOPIC_FALLBACKS: &[(Topic, &str)] = &[
    (
        Topic::CropHealth,
        "For {crop}, start with a soil test, correct nitrogen first (yellowing of older \
         leaves is the usual sign), and add organic matter every season.",
    ),
    (
        Topic::PestManagement,
        "For {crop}, follow integrated pest management: monitor weekly, encourage natural \
         predators, and apply a selective pesticide only once pests cross the economic \
         threshold.",
    ),
    (
        Topic::WeedControl,
        "For {crop}, combine a pre-emergence herbicide with one timely hand weeding in the \
         first month; tight row spacing helps the crop shade weeds out.",
    ),
    (
        Topic::Irrigation,
        "For {crop}, irrigate at the critical growth stages and check soil moisture 5-7 cm \
         deep before each watering; avoid standing water unless the crop demands it.",
    ),
];

/// Crop-level overview used when no topic is named and none can be carried over.
pub(crate) const GENERIC_CROP_ANSWERS: &[(Crop, &str)] = &[
    (
        Crop::Maize,
        "Maize basics: plant at 60x25 cm spacing, feed 120 kg/ha nitrogen in splits, expect \
         6-8 irrigations, and harvest when husks turn brown. Ask about crop health, pests, \
         weeds, or irrigation for specifics.",
    ),
    (
        Crop::Wheat,
        "Wheat basics: sow in October-November, give 4-5 irrigations starting at crown root \
         initiation, and harvest at 20-25% grain moisture. Ask about crop health, pests, \
         weeds, or irrigation for specifics.",
    ),
    (
        Crop::Rice,
        "Rice basics: transplant 25-30 day seedlings, keep 2-3 inches of standing water \
         through tillering, and drain before harvest. Ask about crop health, pests, weeds, \
         or irrigation for specifics.",
    ),
    (
        Crop::Corn,
        "Corn basics: agronomy follows maize — 60x25 cm spacing, split nitrogen, irrigation \
         at tasseling and silking; sweet corn does well on drip. Ask about crop health, \
         pests, weeds, or irrigation for specifics.",
    ),
    (
        Crop::Soybean,
        "Soybean basics: inoculate seed with Rhizobium, ensure good drainage, and protect \
         flowering and pod fill from moisture stress. Ask about crop health, pests, weeds, \
         or irrigation for specifics.",
    ),
];

/// One-line topic summaries used in the decline message.
pub(crate) const TOPIC_SUMMARIES: &[(Topic, &str)] = &[
    (Topic::CropHealth, "nutrient deficiencies, diseases, soil health"),
    (Topic::PestManagement, "pest identification, control techniques, IPM"),
    (Topic::WeedControl, "weed management, herbicides, manual control"),
    (Topic::Irrigation, "water scheduling, irrigation systems, drought management"),
];

/// Example questions appended to the decline message.
pub(crate) const EXAMPLE_QUESTIONS: &[&str] = &[
    "How to control pests in wheat?",
    "What are signs of nitrogen deficiency in maize?",
    "Best irrigation schedule for rice?",
    "How to manage weeds in soybean?",
];

/// Fixed reply for greeting turns.
pub(crate) const GREETING_REPLY: &str =
    "Namaste! I am Krishi Sahayak, your agricultural assistant. I can advise on maize, \
     wheat, rice, corn, and soybean — crop health, pest management, weed control, and \
     irrigation. What would you like to know?";
