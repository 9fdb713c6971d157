//! Built-in posts written by `GET /seed_db`.

use posts_core::PostInput;

/// Number of posts in [`seed_posts`].
pub const SEED_POSTS_COUNT: usize = 9;

const SEED_POSTS: [(&str, &str, &str); SEED_POSTS_COUNT] = [
    (
        "Getting Started with Node.js",
        "This post will guide you through the basics of Node.js and how to set up a Node.js project.",
        "Alice Smith",
    ),
    (
        "Advanced Express.js Techniques",
        "Learn advanced techniques and best practices for building applications with Express.js.",
        "Bob Johnson",
    ),
    (
        "ORM with Sequelize",
        "An introduction to using Sequelize as an ORM for Node.js applications.",
        "Charlie Brown",
    ),
    (
        "Boost Your JavaScript Skills",
        "A collection of useful tips and tricks to improve your JavaScript programming.",
        "Dana White",
    ),
    (
        "Designing RESTful Services",
        "Guidelines and best practices for designing RESTful APIs.",
        "Evan Davis",
    ),
    (
        "Mastering Asynchronous JavaScript",
        "Understand the concepts and patterns for writing asynchronous code in JavaScript.",
        "Fiona Green",
    ),
    (
        "Modern Front-end Technologies",
        "Explore the latest tools and frameworks for front-end development.",
        "George King",
    ),
    (
        "Advanced CSS Layouts",
        "Learn how to create complex layouts using CSS Grid and Flexbox.",
        "Hannah Lewis",
    ),
    (
        "Writing Testable JavaScript Code",
        "An introduction to unit testing and test-driven development in JavaScript.",
        "Jane Miller",
    ),
];

/// The fixed seed list, in insertion order.
pub fn seed_posts() -> Vec<PostInput> {
    SEED_POSTS
        .iter()
        .map(|(title, content, author)| PostInput::new(*title, *content, *author))
        .collect()
}
