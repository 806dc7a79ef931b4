// Copyright 2023 Datafuse Labs.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use qjson5::{dump, parse_value};

fn assert_no_leaks(input: &[u8]) {
    let info = mockalloc::record_allocs(|| {
        let _ = parse_value(input);
    });
    assert_eq!(info.mem_leaked(), 0, "leak while parsing {input:?}");
}

#[test]
fn test_failed_parse_does_not_leak() {
    let inputs: &[&[u8]] = &[
        b"{a: [1, 2, {b: 'text', c: [null, true]}], d: 'unterminated",
        b"[[[[[[[[['deep', 1, 2, 3",
        b"{k1: 'v1', k2: 'v2', k3: [1, 2,, 3]}",
        b"['valid', 'valid', \xff]",
        b"{a: 'x', a: 'y', a: 'z', b: @}",
        b"[1, 2, 3] trailing",
    ];
    for input in inputs {
        assert_no_leaks(input);
    }
}

#[test]
fn test_successful_parse_and_dump_do_not_leak() {
    let info = mockalloc::record_allocs(|| {
        let value = parse_value(b"{list: [1, 'two', {three: 3.5}], dup: 1, dup: 2}").unwrap();
        let text = dump(&value, 2).unwrap();
        assert!(text.contains("\"dup\": 2"));
    });
    assert_eq!(info.mem_leaked(), 0);
}
