use super::{Board, BoardCatalog, Tile, TileAction, HOME_ID};

fn say(id: &str, label: &str, text: &str) -> Tile {
    Tile::say(id, label, Some(text))
}

fn word(id: &str, label: &str) -> Tile {
    Tile::say(id, label, None)
}

fn home_button(id: &str, label: &str) -> Tile {
    Tile::open(id, label, HOME_ID)
}

/// High-frequency words pinned under every board.
pub(super) fn core_words() -> Vec<Tile> {
    vec![
        say("core-i", "I", "I"),
        word("core-want", "want"),
        word("core-need", "need"),
        word("core-more", "more"),
        word("core-stop", "stop"),
        word("core-go", "go"),
        word("core-like", "like"),
        word("core-dont", "don't"),
        word("core-can", "can"),
        word("core-cant", "can't"),
        word("core-please", "please"),
        word("core-thankyou", "thank you"),
    ]
}

fn build(boards: Vec<Board>) -> BoardCatalog {
    match BoardCatalog::new(HOME_ID, boards, core_words()) {
        Some(catalog) => catalog,
        None => unreachable!("built-in catalogs define the home board"),
    }
}

pub(super) fn classic() -> BoardCatalog {
    let home = Board::new(
        HOME_ID,
        "Home",
        vec![
            say("i", "I", "i"),
            word("my", "my"),
            word("have", "have"),
            word("want", "want"),
            word("help", "help"),
            word("yes", "Yes"),
            word("no", "No"),
            word("more", "more"),
            say("allDone", "all done", "all done"),
            Tile::open("needs", "Needs", "needs"),
            Tile::open("feelings", "Feelings", "feelings"),
            Tile::open("pain", "Pain", "pain"),
        ],
    );

    let needs = Board::new(
        "needs",
        "Needs",
        vec![
            word("bathroom", "bathroom"),
            word("water", "water"),
            word("food", "food"),
            word("rest", "rest"),
            say("nurse", "call nurse", "Please call the nurse."),
            home_button("homeBtn", "Home"),
        ],
    );

    let feelings = Board::new(
        "feelings",
        "Feelings",
        vec![
            word("happy", "happy"),
            word("sad", "sad"),
            word("angry", "angry"),
            word("scared", "scared"),
            word("tired", "tired"),
            home_button("homeBtn", "Home"),
        ],
    );

    const PAIN_WORDS: [&str; 9] = [
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    ];
    let mut pain_tiles = vec![say("pain0", "0", "I dont feel any pain.")];
    for (idx, spoken) in PAIN_WORDS.iter().enumerate() {
        let level = idx + 1;
        pain_tiles.push(say(
            &format!("pain{level}"),
            &level.to_string(),
            &format!("My pain level is at {spoken}."),
        ));
    }
    pain_tiles.extend([
        say("pain10", "10", "It hurts so much. Level 10"),
        say("sharp", "Sharp", "I have sharp pain."),
        say("pulse", "pulse", "My pain is pulsating."),
        home_button("homeBtn", "Home"),
    ]);
    let pain = Board::new("pain", "Pain", pain_tiles);

    build(vec![home, needs, feelings, pain])
}

pub(super) fn extended() -> BoardCatalog {
    let home = Board::new(
        HOME_ID,
        "Home",
        vec![
            say("yes", "YES", "Yes").hint("affirm"),
            say("no", "NO", "No").hint("negate"),
            say("help", "HELP", "Help").hint("urgent"),
            say("bathroom", "BATHROOM", "I need the bathroom"),
            Tile::open("pain", "PAIN", "pain").hint("scale"),
            Tile::open("feelings", "FEELINGS", "feelings").hint("emotions"),
            Tile::open("core", "CORE WORDS", "core").hint("high frequency"),
            Tile::open("people", "PEOPLE", "people"),
            Tile::open("food", "FOOD", "food"),
            Tile::open("places", "PLACES", "places"),
            Tile::open("actions", "ACTIONS", "actions"),
            Tile::open("questions", "QUESTIONS", "questions"),
        ],
    );

    let core = Board::new(
        "core",
        "Core Words",
        vec![
            say("i", "I", "I"),
            say("want", "WANT", "want"),
            say("need", "NEED", "need"),
            say("more", "MORE", "more"),
            say("stop", "STOP", "stop"),
            say("go", "GO", "go"),
            say("like", "LIKE", "like"),
            say("dont", "DON'T", "don't"),
            say("can", "CAN", "can"),
            say("cant", "CAN'T", "can't"),
            say("please", "PLEASE", "please"),
            say("thankyou", "THANK YOU", "thank you"),
            Tile::with_action("undo", "DELETE WORD", TileAction::DeleteLast),
            Tile::with_action("clear", "CLEAR", TileAction::Clear),
            Tile::with_action("back", "BACK", TileAction::Back),
        ],
    );

    let questions = Board::new(
        "questions",
        "Questions",
        vec![
            say("what", "WHAT", "What"),
            say("where", "WHERE", "Where"),
            say("when", "WHEN", "When"),
            say("who", "WHO", "Who"),
            say("why", "WHY", "Why"),
            say("how", "HOW", "How"),
            say("canYouHelp", "CAN YOU HELP?", "Can you help me?"),
            say("repeat", "PLEASE REPEAT", "Please repeat that"),
            say("slower", "SLOWER", "Please speak slower"),
            say("understand", "I DON'T UNDERSTAND", "I don't understand"),
            say("yesNo", "YES OR NO", "Yes or no"),
            home_button("backHome", "HOME"),
        ],
    );

    let pain = Board::new(
        "pain",
        "Pain",
        vec![
            say("p0", "0", "My pain is zero").hint("none"),
            say("p2", "2", "My pain is two"),
            say("p4", "4", "My pain is four"),
            say("p6", "6", "My pain is six"),
            say("p8", "8", "My pain is eight"),
            say("p10", "10", "My pain is ten").hint("worst"),
            say("wherePain", "WHERE HURTS", "It hurts here"),
            say("medicine", "MEDICINE", "I need medicine"),
            say("ice", "ICE", "I need ice"),
            say("heat", "HEAT", "I need heat"),
            say("rest", "REST", "I need to rest"),
            say("callNurse", "CALL NURSE", "Please call the nurse"),
        ],
    );

    let feelings = Board::new(
        "feelings",
        "Feelings",
        vec![
            say("happy", "HAPPY", "I feel happy"),
            say("sad", "SAD", "I feel sad"),
            say("angry", "ANGRY", "I feel angry"),
            say("scared", "SCARED", "I feel scared"),
            say("tired", "TIRED", "I feel tired"),
            say("anxious", "ANXIOUS", "I feel anxious"),
            say("confused", "CONFUSED", "I feel confused"),
            say("okay", "OK", "I am okay"),
            say("notOkay", "NOT OK", "I am not okay"),
            say("calm", "CALM", "I want to be calm"),
            say("frustrated", "FRUSTRATED", "I feel frustrated"),
            home_button("backHome2", "HOME"),
        ],
    );

    let people = Board::new(
        "people",
        "People",
        vec![
            say("wife", "WIFE", "my wife"),
            say("husband", "HUSBAND", "my husband"),
            say("mom", "MOM", "my mom"),
            say("dad", "DAD", "my dad"),
            say("doctor", "DOCTOR", "doctor"),
            say("nurse", "NURSE", "nurse"),
            say("friend", "FRIEND", "my friend"),
            say("family", "FAMILY", "my family"),
            say("me", "ME", "me"),
            say("you", "YOU", "you"),
            say("we", "WE", "we"),
            home_button("homePeople", "HOME"),
        ],
    );

    let food = Board::new(
        "food",
        "Food",
        vec![
            say("water", "WATER", "I want water"),
            say("hungry", "HUNGRY", "I am hungry"),
            say("thirsty", "THIRSTY", "I am thirsty"),
            say("eat", "EAT", "I want to eat"),
            say("drink", "DRINK", "I want to drink"),
            say("coffee", "COFFEE", "I want coffee"),
            say("tea", "TEA", "I want tea"),
            say("snack", "SNACK", "I want a snack"),
            say("breakfast", "BREAKFAST", "breakfast"),
            say("lunch", "LUNCH", "lunch"),
            say("dinner", "DINNER", "dinner"),
            home_button("homeFood", "HOME"),
        ],
    );

    // "HOME" here is the place, not the home board.
    let places = Board::new(
        "places",
        "Places",
        vec![
            say("home", "HOME", "home"),
            say("bathroom2", "BATHROOM", "bathroom"),
            say("hospital", "HOSPITAL", "hospital"),
            say("clinic", "CLINIC", "clinic"),
            say("outside", "OUTSIDE", "outside"),
            say("car", "CAR", "car"),
            say("bed", "BED", "bed"),
            say("kitchen", "KITCHEN", "kitchen"),
            home_button("homePlaces", "HOME"),
        ],
    );

    let actions = Board::new(
        "actions",
        "Actions",
        vec![
            say("sit", "SIT", "sit"),
            say("stand", "STAND", "stand"),
            say("walk", "WALK", "walk"),
            say("sleep", "SLEEP", "sleep"),
            say("listen", "LISTEN", "listen"),
            say("look", "LOOK", "look"),
            say("read", "READ", "read"),
            say("write", "WRITE", "write"),
            say("call", "CALL", "call"),
            home_button("homeActions", "HOME"),
        ],
    );

    build(vec![
        home, core, questions, pain, feelings, people, food, places, actions,
    ])
}
