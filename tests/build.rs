//! End-to-end builds of small sites on disk

use std::fs;
use std::path::Path;

use pressmark::Site;

const CONFIG: &str = r#"
url: https://blog.example.com
converter:
  kind: builtin
image_probe:
  kind: none
defaults:
  title: Example Blog
  description: Notes
  author: Ann Author
"#;

fn write(root: &Path, path: &str, contents: &str) {
    let full = root.join(path);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, contents).unwrap();
}

fn read(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join(path)).unwrap()
}

fn example_site(root: &Path) {
    write(root, "_config.yml", CONFIG);
    write(root, "index.md", "---\ntitle: Home\n---\nWelcome!\n");
    write(root, "about.md", "# About\n\nNo front-matter here.\n");
    write(
        root,
        "post/jan.md",
        "---\ntitle: January\ndate: 2021-01-01\ntags: [Rust, notes]\n---\nCold.\n",
    );
    write(
        root,
        "post/jun.md",
        "---\ntitle: June\ndate: 2021-06-01\ntags: [rust]\n---\n```python\nprint('hi')\n```\n",
    );
    write(
        root,
        "post/mar.md",
        "---\ntitle: March\ndate: 2021-03-01\ntags: [notes]\nbanner: ''\n---\nSpring.\n",
    );
    write(root, "node_modules/pkg/README.md", "# not part of the site\n");
}

#[tokio::test]
async fn builds_pages_next_to_sources() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    example_site(root);

    let report = Site::new(root).unwrap().build().await.unwrap();
    assert!(report.is_success(), "{}", report);
    assert_eq!(
        report.written,
        vec![
            "about.html",
            "atom.xml",
            "index.html",
            "post/jan.html",
            "post/jun.html",
            "post/mar.html",
        ]
    );
    assert!(!root.join("node_modules/pkg/README.html").exists());
}

#[tokio::test]
async fn links_posts_chronologically() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    example_site(root);
    Site::new(root).unwrap().build().await.unwrap();

    let mar = read(root, "post/mar.html");
    assert!(mar.contains("Previous: <a href=\"/post/jan.html\">January</a>"));
    assert!(mar.contains("Next: <a href=\"/post/jun.html\">June</a>"));
    assert!(mar.contains("Updated on Mon, 01 Mar 2021 00:00:00 GMT, tagged with ‘notes’."));
    assert!(!mar.contains("top-banner-image"));

    let jun = read(root, "post/jun.html");
    assert!(jun.contains("Previous: <a href=\"/post/mar.html\">March</a>"));
    assert!(!jun.contains("Next:"));

    let jan = read(root, "post/jan.html");
    assert!(!jan.contains("Previous:"));
    assert!(jan.contains("Next: <a href=\"/post/mar.html\">March</a>"));
}

#[tokio::test]
async fn highlights_only_pages_with_code() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    example_site(root);
    Site::new(root).unwrap().build().await.unwrap();

    let jun = read(root, "post/jun.html");
    assert!(jun.contains("<style>"));
    assert!(jun.contains("<pre class=\"code\"><code class=\"language-python\">"));

    let jan = read(root, "post/jan.html");
    assert!(!jan.contains("<style>"));
}

#[tokio::test]
async fn index_and_standalone_pages() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    example_site(root);
    Site::new(root).unwrap().build().await.unwrap();

    let index = read(root, "index.html");
    let jun = index.find("June").unwrap();
    let mar = index.find("March").unwrap();
    let jan = index.find("January").unwrap();
    assert!(jun < mar && mar < jan);
    assert!(index.contains("(2021/1/1: Rust, notes)"));
    assert!(!index.contains("top-nav"));

    let about = read(root, "about.html");
    assert!(about.contains("<title>Example Blog</title>"));
    assert!(about.contains("<h1>About</h1>"));
    assert!(!about.contains("Updated on"));
    assert!(about.contains("<link href=\"assets/theme.css\" rel=\"stylesheet\">"));
}

#[tokio::test]
async fn feed_lists_posts_and_tags() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    example_site(root);
    Site::new(root).unwrap().build().await.unwrap();

    let atom = read(root, "atom.xml");
    assert!(atom.contains(">Example Blog</title>"));
    assert_eq!(atom.matches("<entry>").count(), 3);
    let rust_upper = atom.find("term=\"Rust\"").unwrap();
    let notes = atom.find("term=\"notes\"").unwrap();
    let rust_lower = atom.find("term=\"rust\"").unwrap();
    assert!(rust_upper < notes && notes < rust_lower);
    assert!(atom.contains("https://blog.example.com/post/jun.html"));
    assert!(!atom.contains("about.html"));
}

#[tokio::test]
async fn malformed_front_matter_aborts_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    example_site(root);
    write(root, "post/bad.md", "---\ntitle: [oops\n---\n");

    let err = Site::new(root).unwrap().build().await.unwrap_err();
    assert!(format!("{:#}", err).contains("post/bad.md"));
    assert!(!root.join("index.html").exists());
    assert!(!root.join("atom.xml").exists());
}
