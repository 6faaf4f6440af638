// Copyright (C) 2026 Rostra Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side queries. All functions use Diesel DSL only and never mutate.

pub mod history;
pub mod rosters;
pub mod shifts;
pub mod unmatched;
