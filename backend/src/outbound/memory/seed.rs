//! Sample data for demonstration runs of the in-memory store.

use std::collections::BTreeMap;

use zeroize::Zeroizing;

use super::store::{MemoryDatabase, StoredCredential, StoredGroup, StoredUser, UserGroups};
use crate::domain::{Game, GameId, GroupId, UserToken};

const SAMPLE_USERS: [(&str, &str, &str, &str, &str); 3] = [
    (
        "0f3edb9b-76eb-4fc3-a87b-a40980b9a922",
        "diggynovo",
        "dslb",
        "Diogo Novo",
        "SL Benfica",
    ),
    (
        "fc585a9a-be72-486c-be1a-438f41acbaae",
        "jarcs",
        "jslb",
        "João Arcanjo",
        "FC Alverca",
    ),
    (
        "ad903080-295c-4a84-a7c8-959dda27236d",
        "alberta",
        "aslb",
        "Maria Alberta",
        "Cova da Promise",
    ),
];

const GLOOMHAVEN_ID: &str = "RLlDWHh7hR";

const GLOOMHAVEN_DESCRIPTION: &str = "<p><strong>Gloomhaven</strong> is a game of \
Euro-inspired tactical combat in a persistent world of shifting motives. Players will take on \
the role of a wandering adventurer with their own special set of skills and their own reasons \
for traveling to this dark corner of the world.<br /><br />Players must work together out of \
necessity to clear out menacing dungeons and forgotten ruins. In the process they will enhance \
their abilities with experience and loot, discover new locations to explore and plunder, and \
expand an ever-branching story fueled by the decisions they make.<br /><br />This is a legacy \
game with a persistent and changing world that is ideally played over many game sessions. After \
a scenario, players will make decisions on what to do, which will determine how the story \
continues, kind of like a &quot;Choose Your Own Adventure&quot; book. Playing through a \
scenario is a cooperative affair where players will fight against automated monsters using an \
innovative card system to determine the order of play and what a player does on their \
turn.</p>";

fn gloomhaven(id: GameId) -> Game {
    Game {
        id,
        name: "Gloomhaven".to_owned(),
        description: GLOOMHAVEN_DESCRIPTION.to_owned(),
        url: "https://www.boardgameatlas.com/game/RLlDWHh7hR/gloomhaven".to_owned(),
        image_url: "https://s3-us-west-1.amazonaws.com/5cc.images/games/uploaded/\
                    1559254920151-51ulRXlJ7LL.jpg"
            .to_owned(),
        mechanics: [
            "Campaign",
            "Cooperative Play",
            "Grid Movement",
            "Hand Management",
            "Legacy",
            "Modular Board",
            "Role Playing",
            "Simultaneous action selection",
            "Storytelling",
            "Variable Player Powers",
        ]
        .map(str::to_owned)
        .to_vec(),
        categories: vec!["Adventure".to_owned(), "Fantasy".to_owned()],
    }
}

/// Three users, the cached Gloomhaven record and one "Horror Games" group
/// owned by `diggynovo`.
pub(super) fn sample_database() -> MemoryDatabase {
    let mut db = MemoryDatabase::default();

    for (raw_token, username, password, name, club) in SAMPLE_USERS {
        let Ok(token) = UserToken::new(raw_token) else {
            continue;
        };
        db.credentials.insert(
            username.to_owned(),
            StoredCredential {
                password: Zeroizing::new(password.to_owned()),
                token: token.clone(),
            },
        );
        db.users.insert(
            token,
            StoredUser {
                username: username.to_owned(),
                name: name.to_owned(),
                club: club.to_owned(),
            },
        );
    }

    let Ok(game_id) = GameId::new(GLOOMHAVEN_ID) else {
        return db;
    };
    db.games.insert(game_id.clone(), gloomhaven(game_id.clone()));

    let owner = db
        .credentials
        .get("diggynovo")
        .map(|credential| credential.token.clone());
    if let Some(owner) = owner {
        let horror = StoredGroup {
            name: "Horror Games".to_owned(),
            description: "The scariest horror games in the planet D:".to_owned(),
            games: vec![game_id],
        };
        db.groups.insert(
            owner,
            UserGroups {
                next_id: GroupId::new(1),
                groups: BTreeMap::from([(GroupId::new(0), horror)]),
            },
        );
    }

    db
}
