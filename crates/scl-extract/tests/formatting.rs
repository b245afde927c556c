// crates/scl-extract/tests/formatting.rs

//! Integration tests pinning the canonical textual form: indentation,
//! escaping, self-closing rules, CDATA passthrough and the declaration
//! line.

use scl_extract::{format_scl_str, load_scl_from_str, save_scl_to_string};

#[test]
fn test_canonical_snapshot() {
    let input = "<SCL version=\"2007\">\r\n  <Header id=\"H\"/>\r\n  <IED name=\"R1\" manufacturer=\"A&amp;B\">\r\n    <Private type=\"settings\"><![CDATA[line1\r\nline2]]></Private>\r\n  </IED>\r\n</SCL>";
    let expected = concat!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
        "<SCL version=\"2007\">\n",
        "  <Header id=\"H\"/>\n",
        "  <IED name=\"R1\" manufacturer=\"A&amp;B\">\n",
        "    <Private type=\"settings\">\n",
        "      <![CDATA[line1\nline2]]>\n",
        "    </Private>\n",
        "  </IED>\n",
        "</SCL>\n",
    );
    assert_eq!(format_scl_str(input).unwrap(), expected);
}

#[test]
fn test_formatting_is_idempotent() {
    let messy = r#"<SCL version="2007">
    <Header   id="M"/>
        <IED name="R" desc="a &amp; b">
  <AccessPoint name="AP1">
      <Server><LDevice inst="LD0"><LN0 lnClass="LLN0" inst="" lnType="T"> </LN0></LDevice></Server>
   </AccessPoint>
 </IED>
</SCL>"#;

    let once = format_scl_str(messy).unwrap();
    let twice = format_scl_str(&once).unwrap();
    assert_eq!(once, twice);
    assert!(once.contains("<LN0 lnClass=\"LLN0\" inst=\"\" lnType=\"T\"/>"));
}

#[test]
fn test_structurally_equal_documents_format_identically() {
    // Attribute spacing never reaches the tree.
    let spaced = r#"<SCL><IED    name="x"/></SCL>"#;
    let plain = r#"<SCL><IED name="x"/></SCL>"#;
    assert_eq!(
        load_scl_from_str(spaced).unwrap(),
        load_scl_from_str(plain).unwrap()
    );
    assert_eq!(
        format_scl_str(spaced).unwrap(),
        format_scl_str(plain).unwrap()
    );

    // Insignificant whitespace differs in the tree but not in the output.
    let airy = "<SCL>\n\n    <IED name=\"x\"/>\n</SCL>";
    assert_eq!(
        format_scl_str(airy).unwrap(),
        format_scl_str(plain).unwrap()
    );
}

#[test]
fn test_reserved_characters_escaped_in_output() {
    let source = r#"<SCL desc="&lt;guard&gt; &amp; &quot;main&quot; &apos;x&apos;"><Note>1 &lt; 2 &amp; 3 &gt; 2</Note></SCL>"#;
    let output = format_scl_str(source).unwrap();

    assert!(output.contains(r#"desc="&lt;guard&gt; &amp; &quot;main&quot; &apos;x&apos;""#));
    assert!(output.contains(">1 &lt; 2 &amp; 3 &gt; 2</Note>"));

    // The escaped form resolves back to the source characters, both
    // through this crate's parser and through quick-xml's resolver.
    let reparsed = load_scl_from_str(&output).unwrap();
    assert_eq!(reparsed.root.attr("desc"), Some(r#"<guard> & "main" 'x'"#));
    assert_eq!(
        quick_xml::escape::unescape("&lt;guard&gt; &amp; &quot;main&quot; &apos;x&apos;").unwrap(),
        r#"<guard> & "main" 'x'"#
    );
}

#[test]
fn test_cdata_line_endings_normalized() {
    let source =
        "<SCL><Private type=\"p\"><![CDATA[a\r\nb\rc]]></Private><Note><![CDATA[x\r\ny]]></Note></SCL>";
    let output = format_scl_str(source).unwrap();

    assert!(output.contains("<![CDATA[a\nb\nc]]>"));
    assert!(output.contains("<![CDATA[x\ny]]>"));
    assert!(!output.contains('\r'));
}

#[test]
fn test_single_text_child_stays_inline() {
    let source = "<SCL><P type=\"IP\">  192.168.0.1\n  </P></SCL>";
    let output = format_scl_str(source).unwrap();
    assert!(output.contains("  <P type=\"IP\">192.168.0.1</P>\n"));
}

#[test]
fn test_whitespace_only_children_self_close() {
    let source = "<SCL><LN0 lnClass=\"LLN0\" inst=\"\" lnType=\"T\">\n   </LN0><Empty></Empty></SCL>";
    let output = format_scl_str(source).unwrap();

    assert!(output.contains("<LN0 lnClass=\"LLN0\" inst=\"\" lnType=\"T\"/>"));
    assert!(output.contains("<Empty/>"));
    assert!(!output.contains("</LN0>"));
}

#[test]
fn test_declaration_added_exactly_once() {
    let output = format_scl_str("<SCL/>").unwrap();
    assert_eq!(output, "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<SCL/>\n");

    // A source declaration is replaced by the canonical one.
    let with_decl = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<SCL/>";
    let output = format_scl_str(with_decl).unwrap();
    assert_eq!(output.matches("<?xml").count(), 1);
    assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n"));
    assert!(!output.contains("standalone"));
}

#[test]
fn test_private_without_cdata_formats_normally() {
    let output = format_scl_str("<SCL><Private type=\"p\"><Val>1</Val></Private></SCL>").unwrap();
    assert!(output.contains("  <Private type=\"p\">\n"));
    assert!(output.contains("    <Val>1</Val>\n"));
}

#[test]
fn test_private_keeps_first_cdata_only() {
    let output = format_scl_str(
        "<SCL><Private type=\"p\"><Val>1</Val><![CDATA[first]]><![CDATA[second]]></Private></SCL>",
    )
    .unwrap();
    assert!(output.contains("<![CDATA[first]]>"));
    assert!(!output.contains("second"));
    assert!(!output.contains("<Val>"));
}

#[test]
fn test_format_matches_manual_pipeline() {
    let source = "<SCL version=\"2007\"><IED name=\"R\"/></SCL>";
    let document = load_scl_from_str(source).unwrap();
    assert_eq!(
        format_scl_str(source).unwrap(),
        save_scl_to_string(&document).unwrap()
    );
}
