//! Buying and selling with actors.
//!
//! Sale and purchase tables live on the actor and are keyed by
//! `known_ix`, so any copy of the currency spends and any copy of the
//! wares sells. Wares are priced in whole units of one currency.

use parlor_foundation::{Ix, Result, VerbResult};
use parlor_parser::{Command, Scope, TypeConstraint, VerbRecord};
use parlor_world::{BuyItem, Holder, SaleItem, Stock};

use crate::game::Game;

use super::{capitalize, dobj_ix, iobj_ix, name, Installer};

pub(super) fn install(i: &mut Installer) -> Result<()> {
    i.verb(
        VerbRecord::new("buy")
            .with_synonyms(&["purchase"])
            .with_template(&["buy", "<dobj>", "from", "<iobj>"])
            .with_template(&["buy", "<dobj>"])
            .with_dscope(Scope::Knows)
            .with_iscope(Scope::Near)
            .with_itype(TypeConstraint::Actor)
            .with_preposition(&["from"])
            .with_help("buy THING [from PERSON]"),
        buy_verb,
    )?;
    i.verb(
        VerbRecord::new("sell")
            .with_template(&["sell", "<dobj>", "to", "<iobj>"])
            .with_template(&["sell", "<dobj>"])
            .with_dscope(Scope::Inv)
            .with_iscope(Scope::Near)
            .with_itype(TypeConstraint::Actor)
            .with_preposition(&["to"])
            .with_help("sell THING [to PERSON]"),
        sell_verb,
    )?;
    Ok(())
}

// =============================================================================
// Buying
// =============================================================================

fn buy_verb(game: &mut Game, command: &Command) -> VerbResult {
    let wares = dobj_ix(command)?;
    let wares_known = game.world.thing(&wares)?.known_ix.clone();
    let wname = name(game, &wares)?;

    let Some(merchant) = find_merchant(game, iobj_ix(command), &wares_known, true)? else {
        game.events.say("No one here is selling that.");
        return Ok(());
    };
    let mname = name(game, &merchant)?;
    let Some(sale) = sale_entry(game, &merchant, &wares_known)? else {
        game.events.say(format!(
            "{} isn't selling the {wname}.",
            capitalize(&mname)
        ));
        return Ok(());
    };
    if sale.stock == Stock::Limited(0) {
        game.events
            .say(format!("{} is out of those.", capitalize(&mname)));
        return Ok(());
    }

    // Count spendable currency anywhere in the player's possession.
    let coins = holdings_of(game, &sale.currency)?;
    let price = usize::try_from(sale.price.max(0)).unwrap_or(usize::MAX);
    if coins.len() < price {
        game.events.say(format!("You can't afford the {wname}."));
        return Ok(());
    }

    // Pay, then hand over a fresh copy; the prototype stays with the
    // merchant's table.
    for coin in coins.into_iter().take(price) {
        game.world.move_to(&coin, &Holder::Thing(merchant.clone()))?;
    }
    let player = game.world.player()?.clone();
    let bought = game.world.copy_thing(&sale.item)?;
    game.world.add_thing(&Holder::Thing(player), &bought)?;
    game.world.make_known(&bought)?;

    if let Stock::Limited(n) = sale.stock {
        set_stock(game, &merchant, &wares_known, Stock::Limited(n - 1))?;
    }
    game.events.say(format!("You buy the {wname}."));
    Ok(())
}

// =============================================================================
// Selling
// =============================================================================

fn sell_verb(game: &mut Game, command: &Command) -> VerbResult {
    let item = dobj_ix(command)?;
    let item_known = game.world.thing(&item)?.known_ix.clone();
    let iname = name(game, &item)?;

    let Some(merchant) = find_merchant(game, iobj_ix(command), &item_known, false)? else {
        game.events.say("No one here wants to buy that.");
        return Ok(());
    };
    let mname = name(game, &merchant)?;
    let Some(deal) = buy_entry(game, &merchant, &item_known)? else {
        game.events.say(format!(
            "{} doesn't want the {iname}.",
            capitalize(&mname)
        ));
        return Ok(());
    };
    if deal.wants == Some(0) {
        game.events.say(format!(
            "{} doesn't want any more of those.",
            capitalize(&mname)
        ));
        return Ok(());
    }

    game.world.move_to(&item, &Holder::Thing(merchant.clone()))?;
    let player = game.world.player()?.clone();
    let price = usize::try_from(deal.price.max(0)).unwrap_or(0);
    for _ in 0..price {
        let coin = game.world.copy_thing(&deal.currency)?;
        game.world.add_thing(&Holder::Thing(player.clone()), &coin)?;
        game.world.make_known(&coin)?;
    }
    if let Some(n) = deal.wants {
        set_wants(game, &merchant, &item_known, Some(n - 1))?;
    }
    game.events.say(format!("You sell the {iname}."));
    Ok(())
}

// =============================================================================
// Table access
// =============================================================================

/// The named merchant, or the first actor in the room whose table
/// carries this item.
fn find_merchant(
    game: &Game,
    named: Option<Ix>,
    item_known: &Ix,
    selling: bool,
) -> VerbResult<Option<Ix>> {
    if let Some(actor) = named {
        return Ok(Some(actor));
    }
    let player = game.world.player()?.clone();
    let Some(room) = game.world.outermost_room(&player)? else {
        return Ok(None);
    };
    for ix in game.world.room(&room)?.contents() {
        if *ix == player {
            continue;
        }
        let thing = game.world.thing(ix)?;
        let Some(data) = &thing.actor else { continue };
        let table_hit = if selling {
            data.for_sale.contains_key(item_known)
        } else {
            data.will_buy.contains_key(item_known)
        };
        if table_hit {
            return Ok(Some(ix.clone()));
        }
    }
    Ok(None)
}

fn sale_entry(game: &Game, merchant: &Ix, item_known: &Ix) -> VerbResult<Option<SaleItem>> {
    Ok(game
        .world
        .thing(merchant)?
        .actor
        .as_ref()
        .and_then(|data| data.for_sale.get(item_known))
        .cloned())
}

fn buy_entry(game: &Game, merchant: &Ix, item_known: &Ix) -> VerbResult<Option<BuyItem>> {
    Ok(game
        .world
        .thing(merchant)?
        .actor
        .as_ref()
        .and_then(|data| data.will_buy.get(item_known))
        .cloned())
}

fn set_stock(game: &mut Game, merchant: &Ix, item_known: &Ix, stock: Stock) -> VerbResult {
    if let Some(data) = &mut game.world.thing_mut(merchant)?.actor
        && let Some(entry) = data.for_sale.get_mut(item_known)
    {
        entry.stock = stock;
    }
    Ok(())
}

fn set_wants(
    game: &mut Game,
    merchant: &Ix,
    item_known: &Ix,
    wants: Option<u32>,
) -> VerbResult {
    if let Some(data) = &mut game.world.thing_mut(merchant)?.actor
        && let Some(entry) = data.will_buy.get_mut(item_known)
    {
        entry.wants = wants;
    }
    Ok(())
}

/// Everything in the player's possession that spends as this
/// currency, by `known_ix`.
fn holdings_of(game: &Game, currency_known: &Ix) -> VerbResult<Vec<Ix>> {
    let player = game.world.player()?.clone();
    let mut coins = Vec::new();
    for held in game.world.all_contents_list(&Holder::Thing(player))? {
        if game.world.thing(&held)?.known_ix == *currency_known {
            coins.push(held);
        }
    }
    Ok(coins)
}
