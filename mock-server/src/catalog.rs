use serde::{Deserialize, Serialize};

/// Catalog entry, serialized with the service's field names.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    #[serde(rename = "subTitle")]
    pub sub_title: String,
    pub author: String,
    pub publish_date: String,
    pub publisher: String,
    pub pages: u32,
    pub description: String,
    pub website: String,
}

#[allow(clippy::too_many_arguments)]
fn book(
    isbn: &str,
    title: &str,
    sub_title: &str,
    author: &str,
    publish_date: &str,
    publisher: &str,
    pages: u32,
    website: &str,
) -> Book {
    Book {
        isbn: isbn.to_string(),
        title: title.to_string(),
        sub_title: sub_title.to_string(),
        author: author.to_string(),
        publish_date: publish_date.to_string(),
        publisher: publisher.to_string(),
        pages,
        description: format!("{title}: {sub_title}."),
        website: website.to_string(),
    }
}

/// The eight-book demo catalog.
pub fn demo_catalog() -> Vec<Book> {
    vec![
        book(
            "9781449325862",
            "Git Pocket Guide",
            "A Working Introduction",
            "Richard E. Silverman",
            "2020-06-04T08:48:39.000Z",
            "O'Reilly Media",
            234,
            "http://chimera.labs.oreilly.com/books/1230000000561/index.html",
        ),
        book(
            "9781449331818",
            "Learning JavaScript Design Patterns",
            "A JavaScript and jQuery Developer's Guide",
            "Addy Osmani",
            "2020-06-04T09:11:40.000Z",
            "O'Reilly Media",
            254,
            "http://www.addyosmani.com/resources/essentialjsdesignpatterns/book/",
        ),
        book(
            "9781449337711",
            "Designing Evolvable Web APIs with ASP.NET",
            "Harnessing the Power of the Web",
            "Glenn Block et al.",
            "2020-06-04T09:12:43.000Z",
            "O'Reilly Media",
            238,
            "http://chimera.labs.oreilly.com/books/1234000001708/index.html",
        ),
        book(
            "9781449365035",
            "Speaking JavaScript",
            "An In-Depth Guide for Programmers",
            "Axel Rauschmayer",
            "2014-02-01T00:00:00.000Z",
            "O'Reilly Media",
            460,
            "http://speakingjs.com/",
        ),
        book(
            "9781491904244",
            "You Don't Know JS",
            "ES6 & Beyond",
            "Kyle Simpson",
            "2015-12-27T00:00:00.000Z",
            "O'Reilly Media",
            278,
            "https://github.com/getify/You-Dont-Know-JS/tree/master/es6%20&%20beyond",
        ),
        book(
            "9781491950296",
            "Programming JavaScript Applications",
            "Robust Web Architecture with Node, HTML5, and Modern JS Libraries",
            "Eric Elliott",
            "2014-07-01T00:00:00.000Z",
            "O'Reilly Media",
            254,
            "http://chimera.labs.oreilly.com/books/1234000000262/index.html",
        ),
        book(
            "9781593275846",
            "Eloquent JavaScript, Second Edition",
            "A Modern Introduction to Programming",
            "Marijn Haverbeke",
            "2014-12-14T00:00:00.000Z",
            "No Starch Press",
            472,
            "http://eloquentjavascript.net/",
        ),
        book(
            "9781593277574",
            "Understanding ECMAScript 6",
            "The Definitive Guide for JavaScript Developers",
            "Nicholas C. Zakas",
            "2016-09-03T00:00:00.000Z",
            "No Starch Press",
            352,
            "https://leanpub.com/understandinges6/read",
        ),
    ]
}
