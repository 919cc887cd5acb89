/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use postbox::prelude::*;

/// Runs on whichever thread sends to it; there is no task behind it.
struct Printer {
    printed: usize,
}

impl Behavior for Printer {
    type Message = String;

    fn receive(&mut self, message: String) -> anyhow::Result<()> {
        self.printed += 1;
        println!("Got: {message}");
        Ok(())
    }

    fn terminate(&mut self) {
        println!("printer closing after {} messages", self.printed);
    }
}

fn main() -> anyhow::Result<()> {
    let printer = InlineActor::new("printer", Printer { printed: 0 });
    printer.prime()?;
    printer.send("Hello".to_string())?;
    printer.send("World".to_string())?;
    printer.close();
    Ok(())
}
