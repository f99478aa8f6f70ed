//! Gate-then-install flows: the host defers install until asynchronous
//! placeholder injection has settled.

use futures::executor::block_on;

use mathsplice::watcher::PENDING_CLASS;
use mathsplice::{
    DeterministicMathRenderer, Document, GateDecision, InstallGate, Installer,
};

const LOADING_PAGE: &str = r#"<html><body>
<img id="pending-1" class="svg-injectable" src="figure1.svg"/>
<img id="pending-2" class="svg-injectable" src="figure2.svg"/>
<svg><text x="10" y="10">$a$</text></svg>
</body></html>"#;

/// Swap one placeholder for an injected inline SVG, the way a host's
/// injection script would.
fn inject_svg(doc: &mut Document, placeholder_id: &str, markup_text: &str) {
    let placeholder = doc
        .descendants(doc.root())
        .find(|&id| doc.attribute(id, "id") == Some(placeholder_id))
        .expect("placeholder present");
    let svg = doc.create_element("svg");
    let text = doc.create_element("text");
    doc.set_attribute(text, "x", "0");
    doc.set_attribute(text, "y", "0");
    let markup = doc.create_text(markup_text);
    doc.append(text, markup);
    doc.append(svg, text);
    doc.replace(placeholder, svg).expect("placeholder attached");
}

#[test]
fn test_deferred_install_waits_for_all_injections() {
    let mut doc = Document::parse(LOADING_PAGE).unwrap();
    let (mut gate, decision) = InstallGate::engage(&mut doc);
    assert_eq!(decision, GateDecision::Deferred);

    inject_svg(&mut doc, "pending-1", "$b$");
    assert!(!gate.check(&doc), "second placeholder still pending");

    inject_svg(&mut doc, "pending-2", "$c$");
    assert!(gate.check(&doc), "all placeholders injected");

    // The host now runs the install pass the gate asked for
    let mut installer = Installer::new(DeterministicMathRenderer::new());
    let report = block_on(installer.install(&mut doc)).unwrap();

    // Math from the original page and from both injected SVGs
    assert_eq!(report.candidates, 3);
    assert_eq!(report.spliced, 3);
    assert_eq!(doc.to_xml().matches("math-glyph").count(), 3);
}

#[test]
fn test_loaded_page_skips_the_watcher_entirely() {
    let mut doc =
        Document::parse(r#"<html><body><svg><text x="1" y="2">$a$</text></svg></body></html>"#)
            .unwrap();
    let (gate, decision) = InstallGate::engage(&mut doc);

    assert_eq!(decision, GateDecision::InstallNow);
    assert!(!gate.is_watching());
    assert_eq!(doc.observer_count(), 0, "no subscription was registered");

    let mut installer = Installer::new(DeterministicMathRenderer::new());
    let report = block_on(installer.install(&mut doc)).unwrap();
    assert_eq!(report.spliced, 1);
}

#[test]
fn test_gate_never_fires_twice() {
    let mut doc = Document::parse(LOADING_PAGE).unwrap();
    let (mut gate, _) = InstallGate::engage(&mut doc);

    inject_svg(&mut doc, "pending-1", "$b$");
    inject_svg(&mut doc, "pending-2", "$c$");
    assert!(gate.check(&doc));

    // Later DOM churn, including new pending placeholders, is ignored
    let body = doc.body_or_root();
    let late = doc.create_element("img");
    doc.set_attribute(late, "class", PENDING_CLASS);
    doc.append(body, late);
    assert!(!gate.check(&doc));
    assert!(!gate.is_watching());
}
