use observekit::policy::fifo::BoundedQueue;

fn main() {
    // Keep only the three most recent log lines
    let recent: BoundedQueue<&str> = BoundedQueue::new(3);

    recent.on_dequeued(|e| println!("dropped: {}", e.item));

    for line in ["boot", "listen", "accept", "read", "close"] {
        recent.enqueue(line);
    }

    // Oldest first
    println!("recent: {:?}", recent.values());

    if let Some(next) = recent.try_dequeue().into_value() {
        println!("next to drain: {}", next);
    }
}
