//! Listing pages

use super::{escape, layout};
use cafe_types::{Cafe, Choice};
use std::fmt::Write;

fn yes_no(value: bool) -> &'static str {
    Choice::from(value).as_str()
}

/// Full details of every cafe.
pub fn find_page(cafes: &[Cafe]) -> String {
    let mut body = String::from("    <h1>All Cafes</h1>\n");

    if cafes.is_empty() {
        body.push_str(r#"    <p class="text-muted">No cafes yet. <a href="/add.html">Add one</a>.</p>"#);
        return layout("All Cafes", &body);
    }

    body.push_str(
        r#"    <table class="table table-striped align-middle">
      <thead>
        <tr>
          <th>Name</th><th>Location</th><th>Map</th><th>Image</th><th>Seats</th>
          <th>Toilet</th><th>Wifi</th><th>Sockets</th><th>Calls</th><th>Coffee price</th>
        </tr>
      </thead>
      <tbody>
"#,
    );

    for cafe in cafes {
        let _ = writeln!(
            body,
            r#"        <tr id="cafe-{id}">
          <td>{name}</td>
          <td>{location}</td>
          <td><a href="{map_url}" target="_blank" rel="noopener">Map</a></td>
          <td><img src="{img_url}" alt="{name}" height="60"></td>
          <td>{seats}</td>
          <td>{toilet}</td>
          <td>{wifi}</td>
          <td>{sockets}</td>
          <td>{calls}</td>
          <td>{price}</td>
        </tr>"#,
            id = cafe.id,
            name = escape(&cafe.name),
            location = escape(&cafe.location),
            map_url = escape(&cafe.map_url),
            img_url = escape(&cafe.img_url),
            seats = escape(&cafe.seats),
            toilet = yes_no(cafe.has_toilet),
            wifi = yes_no(cafe.has_wifi),
            sockets = yes_no(cafe.has_sockets),
            calls = yes_no(cafe.can_take_calls),
            price = escape(cafe.coffee_price.as_deref().unwrap_or("")),
        );
    }

    body.push_str("      </tbody>\n    </table>");
    layout("All Cafes", &body)
}

/// Cafe names with delete links. Callers pass the cafes already sorted.
pub fn delete_page(cafes: &[Cafe]) -> String {
    let mut body = String::from("    <h1>Delete a Cafe</h1>\n");

    if cafes.is_empty() {
        body.push_str(r#"    <p class="text-muted">There is nothing to delete.</p>"#);
        return layout("Delete a Cafe", &body);
    }

    body.push_str("    <ul class=\"list-group\">\n");
    for cafe in cafes {
        let _ = writeln!(
            body,
            r#"      <li class="list-group-item d-flex justify-content-between">{name} <a class="btn btn-sm btn-danger" href="/delete/{id}">Delete</a></li>"#,
            name = escape(&cafe.name),
            id = cafe.id,
        );
    }
    body.push_str("    </ul>");

    layout("Delete a Cafe", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cafe(id: i64, name: &str) -> Cafe {
        Cafe {
            id,
            name: name.to_string(),
            map_url: "https://maps.example/1".to_string(),
            img_url: "https://img.example/1".to_string(),
            location: "Soho".to_string(),
            seats: "10-20".to_string(),
            has_toilet: true,
            has_wifi: false,
            has_sockets: true,
            can_take_calls: false,
            coffee_price: None,
        }
    }

    #[test]
    fn test_find_page_lists_details() {
        let html = find_page(&[cafe(1, "Blue Bottle")]);
        assert!(html.contains("<td>Blue Bottle</td>"));
        assert!(html.contains("<td>Soho</td>"));
        assert!(html.contains(r#"href="https://maps.example/1""#));
        assert!(html.contains("<td>Yes</td>"));
        assert!(html.contains("<td>No</td>"));
    }

    #[test]
    fn test_find_page_empty() {
        assert!(find_page(&[]).contains("No cafes yet"));
    }

    #[test]
    fn test_delete_page_links() {
        let html = delete_page(&[cafe(3, "A & B"), cafe(1, "Zed")]);
        assert!(html.contains(r#"A &amp; B <a class="btn btn-sm btn-danger" href="/delete/3">"#));
        let a = html.find("A &amp; B").unwrap();
        let z = html.find("Zed").unwrap();
        assert!(a < z);
    }
}
