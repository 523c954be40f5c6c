use observekit::store::keyed::KeyedStore;

#[derive(Debug)]
struct Session {
    user: String,
    hits: u32,
}

fn main() {
    let sessions = KeyedStore::new(|s: &Session| s.user.clone());

    sessions.on_added(|e| println!("login: {}", e.item.user));
    sessions.on_updated(|e| println!("activity: {} ({} hits)", e.item.user, e.item.hits));
    sessions.on_removed(|e| println!("logout: {}", e.item.user));

    sessions.upsert(Session { user: "ada".into(), hits: 1 });
    sessions.upsert(Session { user: "grace".into(), hits: 1 });
    sessions.upsert(Session { user: "ada".into(), hits: 2 });

    match sessions.get(&"linus".to_string()) {
        Ok(session) => println!("found {:?}", session),
        Err(e) => println!("lookup failed: {}", e),
    }

    println!("active: {:?}", sessions.keys());
    sessions.clear();
}
