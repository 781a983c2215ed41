//! Mock requests the feed starts with.

use crate::models::{Category, Request, Urgency};

#[allow(clippy::too_many_arguments)]
fn seed_request(
    id: &str,
    title: &str,
    description: &str,
    category: Category,
    urgency: Urgency,
    price: f64,
    distance: u32,
    time_ago: &str,
    tags: &[&str],
    offers_count: u32,
) -> Request {
    Request {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category,
        urgency,
        price,
        distance,
        time_ago: time_ago.to_string(),
        image: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        offers_count,
        is_new: false,
    }
}

/// The six requests shown on a fresh campus feed.
pub fn seed_requests() -> Vec<Request> {
    let mut charger = seed_request(
        "1",
        "Need MacBook Charger Urgently",
        "My MacBook charger stopped working and I have an important presentation tomorrow. Looking for a 60W USB-C charger.",
        Category::Electronics,
        Urgency::High,
        50.0,
        25,
        "5 min ago",
        &["MacBook", "USB-C", "60W"],
        3,
    );
    charger.is_new = true;

    vec![
        charger,
        seed_request(
            "2",
            "Data Structures & Algorithms Textbook",
            "Need the latest edition of Introduction to Algorithms by Cormen. Only need it for 2 weeks for exam prep.",
            Category::Books,
            Urgency::Medium,
            100.0,
            40,
            "1 hour ago",
            &["CS", "Algorithms", "Textbook"],
            1,
        ),
        seed_request(
            "3",
            "Ride to Airport Tomorrow 6 AM",
            "Need a ride to the airport tomorrow morning. Can share fuel costs. My flight is at 8 AM so need to leave campus by 6.",
            Category::Transport,
            Urgency::High,
            200.0,
            15,
            "2 hours ago",
            &["Airport", "Early Morning", "Fuel Share"],
            0,
        ),
        seed_request(
            "4",
            "Scientific Calculator for Exam",
            "Need a scientific calculator for my calculus exam next week. Casio fx-991ES or similar model preferred.",
            Category::Electronics,
            Urgency::Low,
            30.0,
            60,
            "4 hours ago",
            &["Calculator", "Exam", "Casio"],
            2,
        ),
        seed_request(
            "5",
            "Home-cooked Meal",
            "Really missing home food! Looking for someone who can cook a simple North Indian meal. Will pay well!",
            Category::Food,
            Urgency::Medium,
            150.0,
            35,
            "6 hours ago",
            &["Homemade", "North Indian", "Comfort Food"],
            5,
        ),
        seed_request(
            "6",
            "Camera for Event Photography",
            "Need a DSLR camera for our college fest next weekend. Sony or Canon preferred. Event is for 2 days.",
            Category::Electronics,
            Urgency::Low,
            300.0,
            80,
            "1 day ago",
            &["DSLR", "Photography", "Event"],
            1,
        ),
    ]
}
