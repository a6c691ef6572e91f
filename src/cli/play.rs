use crate::{
    catalog,
    cli::TerminalMessenger,
    delivery, info,
    management::SessionManager,
    success, warning,
};

pub async fn play(conversation: &str, selection: &str, requester: &str) {
    let track = match selection.parse::<usize>() {
        // a number picks from the conversation's last displayed list
        Ok(ordinal) => match SessionManager::load(conversation).await {
            Ok(session) => match session.resolve(ordinal) {
                Some(track) => track.clone(),
                None => {
                    warning!(
                        "The last search for this conversation has {} entries, item {} does not exist",
                        session.len(),
                        ordinal
                    );
                    return;
                }
            },
            Err(_) => {
                warning!(
                    "No stored search for conversation '{}'. Run songferry search first.",
                    conversation
                );
                return;
            }
        },
        // anything else is a keyword: play the first catalog hit
        Err(_) => {
            let mut hits = catalog::search::search_songs(selection, 1).await;
            match hits.pop() {
                Some(track) => track,
                None => {
                    warning!("No tracks found for '{}'", selection);
                    return;
                }
            }
        }
    };

    info!("Fetching {} - {}", track.artist, track.title);

    let messenger = TerminalMessenger;
    match delivery::deliver(&track, requester, &messenger).await {
        Ok(()) => success!("Delivered {} - {}", track.artist, track.title),
        Err(e) => warning!("Delivery failed: {:?}", e),
    }
}
